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

//! Error types

use crate::resource::ResourceKind;
use std::fmt;

/// Boxed error produced by decoders, openers and custom loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resource loading error
///
/// Every variant is a configuration or programmer error: the loader never
/// retries and never substitutes a placeholder. Callers decide whether a
/// failed load should abort the process or only the current request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceError {
    /// Load requested for an id that has no metadata
    Unregistered { kind: ResourceKind, id: u32 },

    /// Asset opener could not open the path
    Open { path: String, reason: String },

    /// Asset stream failed while being read
    Read {
        kind: ResourceKind,
        path: String,
        reason: String,
    },

    /// Asset stream failed to close after a successful load
    Close {
        kind: ResourceKind,
        path: String,
        reason: String,
    },

    /// Decoder or engine object construction rejected the data
    Decode {
        kind: ResourceKind,
        path: String,
        cause: String,
    },

    /// Audio path matched no built-in format and no custom loader accepted it
    UnrecognizedAudioFormat { path: String },

    /// Manifest could not be parsed
    Manifest(String),

    /// IO error outside of a specific asset
    Io(String),
}

impl ResourceError {
    /// Path of the asset involved, if the error is tied to one
    pub fn path(&self) -> Option<&str> {
        match self {
            ResourceError::Open { path, .. }
            | ResourceError::Read { path, .. }
            | ResourceError::Close { path, .. }
            | ResourceError::Decode { path, .. }
            | ResourceError::UnrecognizedAudioFormat { path } => Some(path),
            ResourceError::Unregistered { .. }
            | ResourceError::Manifest(_)
            | ResourceError::Io(_) => None,
        }
    }

    /// Wrap a decoder failure for the asset at `path`
    pub fn decode(kind: ResourceKind, path: &str, cause: impl fmt::Display) -> Self {
        ResourceError::Decode {
            kind,
            path: path.to_string(),
            cause: cause.to_string(),
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::Unregistered { kind, id } => {
                write!(f, "unregistered {kind} with id={id}")
            }
            ResourceError::Open { path, reason } => write!(f, "open {path:?}: {reason}"),
            ResourceError::Read { kind, path, reason } => {
                write!(f, "read {path:?} {kind}: {reason}")
            }
            ResourceError::Close { kind, path, reason } => {
                write!(f, "closing {path:?} {kind} reader: {reason}")
            }
            ResourceError::Decode { kind, path, cause } => {
                write!(f, "decode {path:?} {kind}: {cause}")
            }
            ResourceError::UnrecognizedAudioFormat { path } => {
                write!(f, "load {path:?} audio: unrecognized format")
            }
            ResourceError::Manifest(msg) => write!(f, "Manifest error: {msg}"),
            ResourceError::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ResourceError {}

impl From<std::io::Error> for ResourceError {
    fn from(err: std::io::Error) -> Self {
        ResourceError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        ResourceError::Manifest(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ResourceError>;
