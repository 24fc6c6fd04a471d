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

//! Archetype Resource - typed, lazily-populated resource cache
//!
//! Loads images, audio, fonts, shaders and raw byte blobs exactly once per
//! typed id and serves every later request from memory. Decoding itself is
//! delegated to a [`Backend`]; asset bytes come from an injected
//! [`AssetOpener`].

pub mod asset;
pub mod audio;
pub mod backend;
pub mod cache;
pub mod config;
pub mod decorators;
pub mod error;
pub mod id;
pub mod info;
pub mod loader;
pub mod manifest;
pub mod prelude;
pub mod registry;
pub mod resource;

pub use asset::*;
pub use audio::*;
pub use backend::*;
pub use cache::*;
pub use config::*;
pub use decorators::*;
pub use error::*;
pub use id::*;
pub use info::*;
pub use loader::*;
pub use manifest::*;
pub use registry::*;
pub use resource::*;
