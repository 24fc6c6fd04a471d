//! Loader configuration

use crate::backend::Hinting;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Settings shared by every load of a loader instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Resolution used when building font faces
    pub font_dpi: f64,
    pub font_hinting: Hinting,
}

impl LoaderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            font_dpi: 96.0,
            font_hinting: Hinting::Full,
        }
    }
}
