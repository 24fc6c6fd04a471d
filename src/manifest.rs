//! JSON resource manifests
//!
//! A manifest lists metadata for every kind in one document, so a game can
//! keep its asset table in data instead of code:
//!
//! ```json
//! {
//!     "raw": [{ "id": 1, "path": "maps/level1.json" }],
//!     "audio": [{ "id": 1, "path": "audio/theme.ogg", "group": 1, "volume": -0.2 }],
//!     "fonts": [{ "id": 1, "path": "fonts/main.ttf", "size": 14, "line_spacing": 1.2 }]
//! }
//! ```
//!
//! Stream decorators are code and can't be expressed here. Set them on the
//! audio registry after applying the manifest.

use crate::backend::Backend;
use crate::error::Result;
use crate::id::{AudioId, FontId, ImageId, RawId, ShaderId};
use crate::info::{AudioInfo, FontInfo, ImageInfo, RawInfo, ShaderInfo};
use crate::loader::Loader;
use serde::{Deserialize, Serialize};

/// One manifest line: an id plus the kind's metadata fields
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry<I, M> {
    pub id: I,
    #[serde(flatten)]
    pub info: M,
}

/// Metadata for all resource kinds
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub images: Vec<Entry<ImageId, ImageInfo>>,
    pub audio: Vec<Entry<AudioId, AudioInfo>>,
    pub fonts: Vec<Entry<FontId, FontInfo>>,
    pub shaders: Vec<Entry<ShaderId, ShaderInfo>>,
    pub raw: Vec<Entry<RawId, RawInfo>>,
}

fn pairs<I, M>(entries: Vec<Entry<I, M>>) -> impl Iterator<Item = (I, M)> {
    entries.into_iter().map(|entry| (entry.id, entry.info))
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.audio.len() + self.fonts.len() + self.shaders.len() + self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bind every entry in the loader's registries, replacing existing metadata
    pub fn apply<B: Backend>(self, loader: &Loader<B>) {
        loader.image_registry().assign(pairs(self.images));
        loader.audio_registry().assign(pairs(self.audio));
        loader.font_registry().assign(pairs(self.fonts));
        loader.shader_registry().assign(pairs(self.shaders));
        loader.raw_registry().assign(pairs(self.raw));
    }
}
