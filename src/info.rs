//! Resource metadata records
//!
//! Metadata describes how to obtain and interpret a resource before it is
//! loaded. Nothing here is validated at registration time; problems surface
//! on the first load.

use crate::backend::AudioStream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Transform applied to a decoded audio stream before the player is built.
///
/// Called exactly once per id, on first load.
pub type StreamDecorator =
    Arc<dyn Fn(Box<dyn AudioStream>) -> Box<dyn AudioStream> + Send + Sync>;

/// Image metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Path handed to the asset opener
    pub path: String,

    #[serde(default)]
    pub frame_width: f64,
    #[serde(default)]
    pub frame_height: f64,
}

impl ImageInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_frame(mut self, width: f64, height: f64) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }
}

/// Audio metadata
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AudioInfo {
    pub path: String,

    /// Sound group used for group-wide operations like volume adjustments.
    /// Conventionally 0 is "sound effect", 1 is "music", 2 is "voice".
    #[serde(default)]
    pub group: u32,

    /// Volume adjustment in `[-1, 1]`. 0 means unadjusted, -1 mutes the
    /// sound and 1 makes it as loud as possible.
    #[serde(default)]
    pub volume: f64,

    /// Replaces the default handling of the decoded stream.
    ///
    /// For OGG it runs instead of the implicit infinite loop. For WAV its
    /// presence disables eager in-memory materialization: the decorated
    /// stream is played directly, trading CPU for memory.
    #[serde(skip)]
    pub stream_decorator: Option<StreamDecorator>,
}

impl AudioInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_group(mut self, group: u32) -> Self {
        self.group = group;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_decorator<F>(mut self, decorator: F) -> Self
    where
        F: Fn(Box<dyn AudioStream>) -> Box<dyn AudioStream> + Send + Sync + 'static,
    {
        self.stream_decorator = Some(Arc::new(decorator));
        self
    }
}

impl fmt::Debug for AudioInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioInfo")
            .field("path", &self.path)
            .field("group", &self.group)
            .field("volume", &self.volume)
            .field("stream_decorator", &self.stream_decorator.is_some())
            .finish()
    }
}

/// Font metadata
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FontInfo {
    pub path: String,

    /// Point size of the face
    pub size: u32,

    /// Line height multiplier. 0 and 1 keep the face's own line height.
    #[serde(default)]
    pub line_spacing: f64,
}

impl FontInfo {
    pub fn new(path: impl Into<String>, size: u32) -> Self {
        Self {
            path: path.into(),
            size,
            line_spacing: 0.0,
        }
    }

    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        self.line_spacing = line_spacing;
        self
    }
}

/// Shader metadata
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderInfo {
    pub path: String,
}

impl ShaderInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Raw metadata
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInfo {
    pub path: String,
}

impl RawInfo {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}
