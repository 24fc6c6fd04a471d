//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use archetype_resource::prelude::*;
//! ```

pub use crate::asset::{AssetOpener, AssetStream, FsOpener, MemoryOpener};
pub use crate::audio::CustomAudioLoader;
pub use crate::backend::{AudioStream, Backend, FaceOptions, Headless, Hinting};
pub use crate::config::LoaderConfig;
pub use crate::decorators::{loop_stream, nop_decorator};
pub use crate::error::{ResourceError, Result};
pub use crate::id::{AudioId, FontId, ImageId, RawId, ShaderId};
pub use crate::info::{AudioInfo, FontInfo, ImageInfo, RawInfo, ShaderInfo};
pub use crate::loader::Loader;
pub use crate::manifest::Manifest;
pub use crate::resource::{Audio, Font, Image, Raw, ResourceKind, Shader};
