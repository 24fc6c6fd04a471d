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

//! Audio loading
//!
//! `load_audio` picks a decoding path from the registered file name:
//!
//! - `.ogg` is decoded as Vorbis and wrapped into an infinite loop, unless a
//!   stream decorator is registered, which then runs instead of the loop.
//! - `.wav` is decoded and read fully into memory before the player is
//!   built. A registered decorator disables that: the decorated stream is
//!   played directly.
//! - anything else goes to the [`CustomAudioLoader`], if one is installed.
//!
//! Each path keeps its own table. Once an id has been loaded through any of
//! them, `load_audio` keeps returning that resource.

use crate::asset::{read_asset, with_asset};
use crate::backend::{AudioStream, Backend};
use crate::decorators::loop_stream;
use crate::error::{BoxError, ResourceError, Result};
use crate::id::AudioId;
use crate::info::AudioInfo;
use crate::loader::{registered, Loader};
use crate::resource::{Audio, ResourceKind};
use std::io::Read;
use std::sync::Arc;

/// Loads audio formats the loader does not support by itself, like XM or MP3.
///
/// Called at most once per id that it successfully handles. The input is
/// closed as soon as loading finishes, so copy whatever the returned stream
/// needs to keep. Return `Ok(None)` for resources it can't handle.
///
/// It can't override the way OGG or WAV is loaded: it only runs when neither
/// suffix matches.
pub trait CustomAudioLoader: Send + Sync {
    fn load(
        &self,
        input: &mut dyn Read,
        info: &AudioInfo,
    ) -> std::result::Result<Option<Box<dyn AudioStream>>, BoxError>;
}

impl<F> CustomAudioLoader for F
where
    F: Fn(&mut dyn Read, &AudioInfo) -> std::result::Result<Option<Box<dyn AudioStream>>, BoxError>
        + Send
        + Sync,
{
    fn load(
        &self,
        input: &mut dyn Read,
        info: &AudioInfo,
    ) -> std::result::Result<Option<Box<dyn AudioStream>>, BoxError> {
        self(input, info)
    }
}

fn decorate(stream: Box<dyn AudioStream>, info: &AudioInfo) -> Box<dyn AudioStream> {
    match &info.stream_decorator {
        Some(decorator) => decorator(stream),
        None => stream,
    }
}

impl<B: Backend> Loader<B> {
    /// Install the fallback loader for unrecognized audio formats.
    ///
    /// Resources it already produced stay reachable after it is replaced or
    /// cleared. With a preload-everything scheme you may clear it once
    /// preloading is done.
    pub fn set_custom_audio_loader<L>(&self, custom: L)
    where
        L: CustomAudioLoader + 'static,
    {
        let custom: Arc<dyn CustomAudioLoader> = Arc::new(custom);
        *self.custom_audio_loader.write() = Some(custom);
    }

    pub fn clear_custom_audio_loader(&self) {
        *self.custom_audio_loader.write() = None;
    }

    pub fn has_custom_audio_loader(&self) -> bool {
        self.custom_audio_loader.read().is_some()
    }

    /// Load an audio resource, choosing the format from the path suffix
    pub fn load_audio(&self, id: AudioId) -> Result<Arc<Audio<B::Player>>> {
        let info = registered(&self.audio_registry, ResourceKind::Audio, id)?;

        if let Some(audio) = self
            .wavs
            .get(id)
            .or_else(|| self.oggs.get(id))
            .or_else(|| self.custom_audio.get(id))
        {
            return Ok(audio);
        }

        if info.path.ends_with(".ogg") {
            return self.load_ogg(id);
        }
        if info.path.ends_with(".wav") {
            return self.load_wav(id);
        }
        self.load_custom_audio(id, &info)
    }

    /// Load a WAV resource regardless of its path suffix
    pub fn load_wav(&self, id: AudioId) -> Result<Arc<Audio<B::Player>>> {
        self.wavs.get_or_try_load(id, || {
            let info = registered(&self.audio_registry, ResourceKind::Audio, id)?;
            let encoded = read_asset(self.opener().as_ref(), ResourceKind::Audio, &info.path)?;
            let mut stream = self
                .backend
                .decode_wav(encoded)
                .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))?;

            let player = match &info.stream_decorator {
                None => {
                    let read_error = |reason: String| ResourceError::Read {
                        kind: ResourceKind::Audio,
                        path: info.path.clone(),
                        reason,
                    };
                    let length = usize::try_from(stream.length()).map_err(|_| {
                        read_error(format!("stream length {} exceeds memory", stream.length()))
                    })?;
                    let mut pcm = Vec::new();
                    pcm.try_reserve_exact(length)
                        .map_err(|e| read_error(e.to_string()))?;
                    pcm.resize(length, 0);
                    stream
                        .read_exact(&mut pcm)
                        .map_err(|e| read_error(e.to_string()))?;
                    self.backend.player_from_bytes(pcm)
                }
                Some(decorator) => self.backend.player_from_stream(decorator(stream)),
            }
            .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))?;

            Ok(Audio::new(id, player, &info))
        })
    }

    /// Load an OGG/Vorbis resource regardless of its path suffix
    pub fn load_ogg(&self, id: AudioId) -> Result<Arc<Audio<B::Player>>> {
        self.oggs.get_or_try_load(id, || {
            let info = registered(&self.audio_registry, ResourceKind::Audio, id)?;
            let encoded = read_asset(self.opener().as_ref(), ResourceKind::Audio, &info.path)?;
            let stream = self
                .backend
                .decode_vorbis(encoded)
                .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))?;

            let stream = match &info.stream_decorator {
                Some(decorator) => decorator(stream),
                None => loop_stream(stream),
            };
            let player = self
                .backend
                .player_from_stream(stream)
                .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))?;

            Ok(Audio::new(id, player, &info))
        })
    }

    fn load_custom_audio(&self, id: AudioId, info: &AudioInfo) -> Result<Arc<Audio<B::Player>>> {
        let unrecognized = || ResourceError::UnrecognizedAudioFormat {
            path: info.path.clone(),
        };

        let Some(custom) = self.custom_audio_loader.read().clone() else {
            return Err(unrecognized());
        };

        self.custom_audio.get_or_try_load(id, || {
            let stream = with_asset(
                self.opener().as_ref(),
                ResourceKind::Audio,
                &info.path,
                |mut input| {
                    custom
                        .load(&mut input, info)
                        .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))
                },
            )?
            .ok_or_else(unrecognized)?;

            let player = self
                .backend
                .player_from_stream(decorate(stream, info))
                .map_err(|e| ResourceError::decode(ResourceKind::Audio, &info.path, e))?;

            Ok(Audio::new(id, player, info))
        })
    }
}
