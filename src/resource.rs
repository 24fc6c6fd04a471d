//! Decoded resource objects
//!
//! A resource is created at most once per id and then shared by every
//! caller through an `Arc`. Fields are read-only after construction.

use crate::id::{AudioId, FontId, ImageId, RawId, ShaderId};
use crate::info::AudioInfo;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five resource kinds served by a loader
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Image,
    Audio,
    Font,
    Shader,
    Raw,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Image => "image",
            ResourceKind::Audio => "audio",
            ResourceKind::Font => "font",
            ResourceKind::Shader => "shader",
            ResourceKind::Raw => "raw",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a metadata volume in `[-1, 1]` onto the linear `[0, 1]` scale.
pub fn normalize_volume(volume: f64) -> f64 {
    (volume / 2.0) + 0.5
}

/// Image resource
#[derive(Debug)]
pub struct Image<T> {
    /// Id this resource was loaded for
    pub id: ImageId,
    /// Engine image realized from the decoded pixels
    pub data: T,
    /// Frame size for sprite-sheet slicing, copied from metadata
    pub default_frame_width: f64,
    pub default_frame_height: f64,
}

/// Audio resource
///
/// The player wraps the decoded stream; you may need to rewind it before
/// playing the sound again.
#[derive(Debug)]
pub struct Audio<P> {
    pub id: AudioId,
    pub player: P,
    pub group: u32,
    /// Normalized volume in `[0, 1]`
    pub volume: f64,
}

impl<P> Audio<P> {
    pub(crate) fn new(id: AudioId, player: P, info: &AudioInfo) -> Self {
        Self {
            id,
            player,
            group: info.group,
            volume: normalize_volume(info.volume),
        }
    }
}

/// Font resource
#[derive(Debug)]
pub struct Font<F> {
    pub id: FontId,
    pub face: F,
}

/// Compiled shader resource
#[derive(Debug)]
pub struct Shader<S> {
    pub id: ShaderId,
    pub data: S,
}

/// Uninterpreted resource contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    pub id: RawId,
    pub data: Vec<u8>,
}

impl Raw {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Interpret the bytes as UTF-8 text
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}
