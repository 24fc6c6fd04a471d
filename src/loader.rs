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

//! Resource loader
//!
//! [`Loader`] is both the resource accessor and the decoded resources cache.
//! Register metadata in a kind's registry, then call the matching `load_*`
//! method. Only the first load of an id decodes; every later call returns
//! the same `Arc`.

use crate::asset::{read_asset, AssetOpener};
use crate::audio::CustomAudioLoader;
use crate::backend::{Backend, FaceOptions};
use crate::cache::{CacheStats, ResourceCache};
use crate::config::LoaderConfig;
use crate::error::{ResourceError, Result};
use crate::id::{AudioId, FontId, ImageId, RawId, ShaderId};
use crate::info::{AudioInfo, FontInfo, ImageInfo, RawInfo, ShaderInfo};
use crate::registry::Registry;
use crate::resource::{Audio, Font, Image, Raw, ResourceKind, Shader};
use parking_lot::RwLock;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Loads and caches game resources
pub struct Loader<B: Backend> {
    pub(crate) backend: B,
    pub(crate) config: LoaderConfig,
    pub(crate) opener: RwLock<Arc<dyn AssetOpener>>,
    pub(crate) custom_audio_loader: RwLock<Option<Arc<dyn CustomAudioLoader>>>,

    image_registry: Registry<ImageId, ImageInfo>,
    pub(crate) audio_registry: Registry<AudioId, AudioInfo>,
    font_registry: Registry<FontId, FontInfo>,
    shader_registry: Registry<ShaderId, ShaderInfo>,
    raw_registry: Registry<RawId, RawInfo>,

    images: ResourceCache<ImageId, Image<B::Image>>,
    fonts: ResourceCache<FontId, Font<B::Face>>,
    shaders: ResourceCache<ShaderId, Shader<B::Shader>>,
    raws: ResourceCache<RawId, Raw>,
    pub(crate) wavs: ResourceCache<AudioId, Audio<B::Player>>,
    pub(crate) oggs: ResourceCache<AudioId, Audio<B::Player>>,
    pub(crate) custom_audio: ResourceCache<AudioId, Audio<B::Player>>,
}

impl<B: Backend> Loader<B> {
    /// Create a loader with the default configuration
    pub fn new<O>(backend: B, opener: O) -> Self
    where
        O: AssetOpener + 'static,
    {
        Self::with_config(backend, opener, LoaderConfig::default())
    }

    pub fn with_config<O>(backend: B, opener: O, config: LoaderConfig) -> Self
    where
        O: AssetOpener + 'static,
    {
        let opener: Arc<dyn AssetOpener> = Arc::new(opener);
        Self {
            backend,
            config,
            opener: RwLock::new(opener),
            custom_audio_loader: RwLock::new(None),
            image_registry: Registry::new(),
            audio_registry: Registry::new(),
            font_registry: Registry::new(),
            shader_registry: Registry::new(),
            raw_registry: Registry::new(),
            images: ResourceCache::new(ResourceKind::Image),
            fonts: ResourceCache::new(ResourceKind::Font),
            shaders: ResourceCache::new(ResourceKind::Shader),
            raws: ResourceCache::new(ResourceKind::Raw),
            wavs: ResourceCache::new(ResourceKind::Audio),
            oggs: ResourceCache::new(ResourceKind::Audio),
            custom_audio: ResourceCache::new(ResourceKind::Audio),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Replace the asset opener used by subsequent loads.
    ///
    /// Already loaded resources are unaffected.
    pub fn set_asset_opener<O>(&self, opener: O)
    where
        O: AssetOpener + 'static,
    {
        let opener: Arc<dyn AssetOpener> = Arc::new(opener);
        *self.opener.write() = opener;
    }

    pub(crate) fn opener(&self) -> Arc<dyn AssetOpener> {
        self.opener.read().clone()
    }

    pub fn image_registry(&self) -> &Registry<ImageId, ImageInfo> {
        &self.image_registry
    }

    pub fn audio_registry(&self) -> &Registry<AudioId, AudioInfo> {
        &self.audio_registry
    }

    pub fn font_registry(&self) -> &Registry<FontId, FontInfo> {
        &self.font_registry
    }

    pub fn shader_registry(&self) -> &Registry<ShaderId, ShaderInfo> {
        &self.shader_registry
    }

    pub fn raw_registry(&self) -> &Registry<RawId, RawInfo> {
        &self.raw_registry
    }

    pub fn image_info(&self, id: ImageId) -> Option<ImageInfo> {
        self.image_registry.get(id)
    }

    pub fn audio_info(&self, id: AudioId) -> Option<AudioInfo> {
        self.audio_registry.get(id)
    }

    pub fn font_info(&self, id: FontId) -> Option<FontInfo> {
        self.font_registry.get(id)
    }

    pub fn shader_info(&self, id: ShaderId) -> Option<ShaderInfo> {
        self.shader_registry.get(id)
    }

    pub fn raw_info(&self, id: RawId) -> Option<RawInfo> {
        self.raw_registry.get(id)
    }

    /// Load an image, decoding it on first use
    pub fn load_image(&self, id: ImageId) -> Result<Arc<Image<B::Image>>> {
        self.images.get_or_try_load(id, || {
            let info = registered(&self.image_registry, ResourceKind::Image, id)?;
            let bytes = read_asset(self.opener().as_ref(), ResourceKind::Image, &info.path)?;
            let data = self
                .backend
                .decode_image(&bytes)
                .map_err(|e| ResourceError::decode(ResourceKind::Image, &info.path, e))?;
            Ok(Image {
                id,
                data,
                default_frame_width: info.frame_width,
                default_frame_height: info.frame_height,
            })
        })
    }

    /// Load a font face, building it on first use
    pub fn load_font(&self, id: FontId) -> Result<Arc<Font<B::Face>>> {
        self.fonts.get_or_try_load(id, || {
            let info = registered(&self.font_registry, ResourceKind::Font, id)?;
            let bytes = read_asset(self.opener().as_ref(), ResourceKind::Font, &info.path)?;
            let options = FaceOptions {
                size: f64::from(info.size),
                dpi: self.config.font_dpi,
                hinting: self.config.font_hinting,
            };
            let mut face = self
                .backend
                .new_face(&bytes, &options)
                .map_err(|e| ResourceError::decode(ResourceKind::Font, &info.path, e))?;
            if info.line_spacing != 0.0 && info.line_spacing != 1.0 {
                let height = self.backend.face_height(&face).round() * info.line_spacing;
                face = self.backend.face_with_line_height(face, height.round());
            }
            Ok(Font { id, face })
        })
    }

    /// Load a shader, compiling it on first use
    pub fn load_shader(&self, id: ShaderId) -> Result<Arc<Shader<B::Shader>>> {
        self.shaders.get_or_try_load(id, || {
            let info = registered(&self.shader_registry, ResourceKind::Shader, id)?;
            let source = read_asset(self.opener().as_ref(), ResourceKind::Shader, &info.path)?;
            let data = self
                .backend
                .compile_shader(&source)
                .map_err(|e| ResourceError::decode(ResourceKind::Shader, &info.path, e))?;
            Ok(Shader { id, data })
        })
    }

    /// Load raw bytes. The payload is the asset contents verbatim.
    pub fn load_raw(&self, id: RawId) -> Result<Arc<Raw>> {
        self.raws.get_or_try_load(id, || {
            let info = registered(&self.raw_registry, ResourceKind::Raw, id)?;
            let data = read_asset(self.opener().as_ref(), ResourceKind::Raw, &info.path)?;
            Ok(Raw { id, data })
        })
    }

    pub fn is_image_loaded(&self, id: ImageId) -> bool {
        self.images.is_loaded(id)
    }

    pub fn is_audio_loaded(&self, id: AudioId) -> bool {
        self.wavs.is_loaded(id) || self.oggs.is_loaded(id) || self.custom_audio.is_loaded(id)
    }

    pub fn is_font_loaded(&self, id: FontId) -> bool {
        self.fonts.is_loaded(id)
    }

    pub fn is_shader_loaded(&self, id: ShaderId) -> bool {
        self.shaders.is_loaded(id)
    }

    pub fn is_raw_loaded(&self, id: RawId) -> bool {
        self.raws.is_loaded(id)
    }

    /// Cache statistics for one kind. Audio sums its three format tables.
    pub fn cache_stats(&self, kind: ResourceKind) -> CacheStats {
        match kind {
            ResourceKind::Image => self.images.stats(),
            ResourceKind::Font => self.fonts.stats(),
            ResourceKind::Shader => self.shaders.stats(),
            ResourceKind::Raw => self.raws.stats(),
            ResourceKind::Audio => self
                .wavs
                .stats()
                .merge(self.oggs.stats())
                .merge(self.custom_audio.stats()),
        }
    }

    /// Total number of loaded resources across all kinds
    pub fn loaded_count(&self) -> usize {
        self.images.len()
            + self.fonts.len()
            + self.shaders.len()
            + self.raws.len()
            + self.wavs.len()
            + self.oggs.len()
            + self.custom_audio.len()
    }

    /// Load every id in `ids` with `load`, stopping at the first failure.
    ///
    /// Blocks until done. Runs on the rayon pool with the `parallel` feature.
    ///
    /// ```ignore
    /// loader.preload(&[RAW_LEVEL1, RAW_LEVEL2], Loader::load_raw)?;
    /// ```
    pub fn preload<I, T, F>(&self, ids: &[I], load: F) -> Result<()>
    where
        I: Copy + Send + Sync,
        F: Fn(&Self, I) -> Result<T> + Send + Sync,
    {
        #[cfg(feature = "parallel")]
        {
            ids.par_iter().try_for_each(|&id| load(self, id).map(drop))
        }

        #[cfg(not(feature = "parallel"))]
        {
            ids.iter().try_for_each(|&id| load(self, id).map(drop))
        }
    }
}

/// Metadata for `id`, or the unregistered-id error for its kind
pub(crate) fn registered<I, M>(
    registry: &Registry<I, M>,
    kind: ResourceKind,
    id: I,
) -> Result<M>
where
    I: Copy + Eq + std::hash::Hash + Into<u32>,
    M: Clone,
{
    registry.get(id).ok_or(ResourceError::Unregistered {
        kind,
        id: id.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::MemoryOpener;
    use crate::backend::Headless;

    const RAW_CONFIG: RawId = RawId(3);

    fn loader() -> Loader<Headless> {
        let opener = MemoryOpener::new()
            .with("config.txt", "some example config\n")
            .with("ui/panel.png", vec![0x89, b'P', b'N', b'G']);
        Loader::new(Headless, opener)
    }

    #[test]
    fn test_raw_round_trip() {
        let loader = loader();
        loader.raw_registry().set(RAW_CONFIG, RawInfo::new("config.txt"));

        let raw = loader.load_raw(RAW_CONFIG).unwrap();
        assert_eq!(raw.id, RAW_CONFIG);
        assert_eq!(raw.as_str(), Some("some example config\n"));
        assert!(loader.is_raw_loaded(RAW_CONFIG));
        assert_eq!(loader.loaded_count(), 1);
    }

    #[test]
    fn test_unregistered_raw() {
        let loader = loader();
        let err = loader.load_raw(RawId(42)).unwrap_err();
        assert_eq!(
            err,
            ResourceError::Unregistered {
                kind: ResourceKind::Raw,
                id: 42
            }
        );
    }

    #[test]
    fn test_headless_image_fails_with_path() {
        let loader = loader();
        loader
            .image_registry()
            .set(ImageId(1), ImageInfo::new("ui/panel.png"));

        let err = loader.load_image(ImageId(1)).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Decode { kind: ResourceKind::Image, ref path, .. } if path == "ui/panel.png"
        ));
        assert!(!loader.is_image_loaded(ImageId(1)));
        assert_eq!(loader.cache_stats(ResourceKind::Image).failures, 1);
    }

    #[test]
    fn test_info_accessors() {
        let loader = loader();
        loader
            .font_registry()
            .set(FontId(1), FontInfo::new("fonts/main.ttf", 14));
        assert_eq!(loader.font_info(FontId(1)).unwrap().size, 14);
        assert!(loader.font_info(FontId(2)).is_none());
        assert!(loader.shader_info(ShaderId(1)).is_none());
    }

    #[test]
    fn test_preload_stops_on_missing() {
        let loader = loader();
        loader.raw_registry().set(RAW_CONFIG, RawInfo::new("config.txt"));

        loader.preload(&[RAW_CONFIG], Loader::load_raw).unwrap();
        assert!(loader.is_raw_loaded(RAW_CONFIG));

        let err = loader
            .preload(&[RAW_CONFIG, RawId(99)], |l, id| l.load_raw(id))
            .unwrap_err();
        assert!(matches!(err, ResourceError::Unregistered { id: 99, .. }));
    }
}
