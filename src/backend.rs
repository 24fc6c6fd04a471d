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

//! Engine backend contract
//!
//! The loader decides *when* decoding happens and *what* is remembered. The
//! actual decoding and the construction of engine objects (textures, font
//! faces, shaders, audio players) belong to a [`Backend`].

use crate::error::BoxError;
use serde::{Deserialize, Serialize};
use std::io::{Read, Seek};

/// A decoded, seekable PCM stream
pub trait AudioStream: Read + Seek + Send {
    /// Total length in bytes
    fn length(&self) -> u64;
}

impl AudioStream for Box<dyn AudioStream> {
    fn length(&self) -> u64 {
        (**self).length()
    }
}

/// Glyph hinting applied when building a font face
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    None,
    Vertical,
    #[default]
    Full,
}

/// Parameters for building a font face
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceOptions {
    pub size: f64,
    pub dpi: f64,
    pub hinting: Hinting,
}

/// Per-kind decoders and engine object constructors.
///
/// Every method may fail; the loader wraps failures with the asset path.
pub trait Backend: Send + Sync {
    type Image: Send + Sync;
    type Face: Send + Sync;
    type Shader: Send + Sync;
    type Player: Send + Sync;

    /// Decode container-format image bytes and realize a renderable image
    fn decode_image(&self, bytes: &[u8]) -> Result<Self::Image, BoxError>;

    /// Parse an outline font and build a face
    fn new_face(&self, bytes: &[u8], options: &FaceOptions) -> Result<Self::Face, BoxError>;

    /// Unrounded line height of a face, in pixels
    fn face_height(&self, face: &Self::Face) -> f64;

    /// Wrap a face so it reports `line_height` instead of its own
    fn face_with_line_height(&self, face: Self::Face, line_height: f64) -> Self::Face;

    /// Compile shader source or bytecode
    fn compile_shader(&self, source: &[u8]) -> Result<Self::Shader, BoxError>;

    /// Decode WAV data into a PCM stream, without resampling
    fn decode_wav(&self, encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError>;

    /// Decode OGG/Vorbis data into a PCM stream, without resampling
    fn decode_vorbis(&self, encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError>;

    /// Player over fully materialized PCM bytes
    fn player_from_bytes(&self, pcm: Vec<u8>) -> Result<Self::Player, BoxError>;

    /// Player that pulls from a stream while playing
    fn player_from_stream(&self, stream: Box<dyn AudioStream>) -> Result<Self::Player, BoxError>;
}

/// Backend without any decoders.
///
/// Raw resources load normally; every other kind fails with a decode error.
/// Useful for tools and servers that only consume raw data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

const HEADLESS: &str = "not supported by the headless backend";

impl Backend for Headless {
    type Image = ();
    type Face = ();
    type Shader = ();
    type Player = ();

    fn decode_image(&self, _bytes: &[u8]) -> Result<(), BoxError> {
        Err(HEADLESS.into())
    }

    fn new_face(&self, _bytes: &[u8], _options: &FaceOptions) -> Result<(), BoxError> {
        Err(HEADLESS.into())
    }

    fn face_height(&self, _face: &()) -> f64 {
        0.0
    }

    fn face_with_line_height(&self, face: (), _line_height: f64) {
        face
    }

    fn compile_shader(&self, _source: &[u8]) -> Result<(), BoxError> {
        Err(HEADLESS.into())
    }

    fn decode_wav(&self, _encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError> {
        Err(HEADLESS.into())
    }

    fn decode_vorbis(&self, _encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError> {
        Err(HEADLESS.into())
    }

    fn player_from_bytes(&self, _pcm: Vec<u8>) -> Result<(), BoxError> {
        Err(HEADLESS.into())
    }

    fn player_from_stream(&self, _stream: Box<dyn AudioStream>) -> Result<(), BoxError> {
        Err(HEADLESS.into())
    }
}
