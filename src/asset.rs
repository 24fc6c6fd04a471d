// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Asset opener contract
//!
//! The loader never touches the filesystem itself. It asks an injected
//! [`AssetOpener`] for a byte stream by path, and always closes what it
//! opened, on success and on failure alike.

use crate::error::{ResourceError, Result};
use crate::resource::ResourceKind;
use ahash::AHashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

/// Readable asset data that must be closed explicitly.
///
/// Dropping a stream releases it too, but only `close` can report a failure.
pub trait AssetStream: Read + Send {
    fn close(self: Box<Self>) -> io::Result<()> {
        Ok(())
    }
}

impl AssetStream for File {
    fn close(self: Box<Self>) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

impl<T> AssetStream for Cursor<T> where T: AsRef<[u8]> + Send {}

/// Opens an asset identified by its path
pub trait AssetOpener: Send + Sync {
    fn open(&self, path: &str) -> io::Result<Box<dyn AssetStream>>;
}

impl<F> AssetOpener for F
where
    F: Fn(&str) -> io::Result<Box<dyn AssetStream>> + Send + Sync,
{
    fn open(&self, path: &str) -> io::Result<Box<dyn AssetStream>> {
        self(path)
    }
}

/// Opens assets relative to a directory on disk
#[derive(Clone, Debug)]
pub struct FsOpener {
    root: PathBuf,
}

impl FsOpener {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl Default for FsOpener {
    fn default() -> Self {
        Self::new("assets")
    }
}

impl AssetOpener for FsOpener {
    fn open(&self, path: &str) -> io::Result<Box<dyn AssetStream>> {
        let file = File::open(self.root.join(path))?;
        Ok(Box::new(file))
    }
}

/// Serves assets from an in-memory path → bytes map.
///
/// Handy for embedded data and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryOpener {
    files: AHashMap<String, Arc<[u8]>>,
}

impl MemoryOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), Arc::from(data.into()));
    }

    pub fn with(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl AssetOpener for MemoryOpener {
    fn open(&self, path: &str) -> io::Result<Box<dyn AssetStream>> {
        match self.files.get(path) {
            Some(data) => Ok(Box::new(Cursor::new(data.clone()))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no asset at {path:?}"),
            )),
        }
    }
}

/// Open `path`, hand the stream to `f`, then close it.
///
/// A close failure after a successful `f` becomes [`ResourceError::Close`].
/// If `f` failed, its error wins and the close failure is only logged.
pub fn with_asset<T, F>(opener: &dyn AssetOpener, kind: ResourceKind, path: &str, f: F) -> Result<T>
where
    F: FnOnce(&mut dyn AssetStream) -> Result<T>,
{
    let mut stream = opener.open(path).map_err(|e| ResourceError::Open {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let outcome = f(stream.as_mut());
    let closed = stream.close();

    match (outcome, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(ResourceError::Close {
            kind,
            path: path.to_string(),
            reason: e.to_string(),
        }),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(_close_err)) => {
            #[cfg(feature = "profiling")]
            tracing::warn!(%kind, path, error = %_close_err, "close failed after load error");
            Err(err)
        }
    }
}

/// Read the whole asset at `path` into memory
pub fn read_asset(opener: &dyn AssetOpener, kind: ResourceKind, path: &str) -> Result<Vec<u8>> {
    with_asset(opener, kind, path, |stream| {
        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|e| ResourceError::Read {
                kind,
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Ok(data)
    })
}
