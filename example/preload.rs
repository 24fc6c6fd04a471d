//! Example: register resources, preload them, then read them back.
//!
//! Run with `cargo run --example preload --features profiling` to see the
//! load spans.

use archetype_resource::prelude::*;
use std::collections::HashMap;

// Essential game data can be enumerated with constants.
// Dynamic content would generate ids at run time instead.
const RAW_LEVEL1: RawId = RawId(1);
const RAW_LEVEL2: RawId = RawId(2);
const RAW_DEFAULT_CONFIG: RawId = RawId(3);

const MANIFEST: &str = r#"{
    "raw": [
        { "id": 1, "path": "maps/level1.json" },
        { "id": 2, "path": "maps/level2.json" }
    ]
}"#;

// Stub for the real data. A real game would combine embedded
// assets with an FsOpener.
fn game_data() -> MemoryOpener {
    MemoryOpener::new()
        .with("maps/level1.json", r#"{"name": "level1"}"#)
        .with("maps/level2.json", r#"{"name": "level2"}"#)
        .with("config.txt", "some example config\n")
}

fn main() -> Result<()> {
    #[cfg(feature = "profiling")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let loader = Loader::new(Headless, game_data());

    // Before a resource is loadable it must be bound in its kind's registry,
    // either from data...
    Manifest::from_json(MANIFEST)?.apply(&loader);
    // ...or from code.
    let extra: HashMap<RawId, RawInfo> =
        [(RAW_DEFAULT_CONFIG, RawInfo::new("config.txt"))].into_iter().collect();
    loader.raw_registry().assign(extra);

    // Preload during a loading screen; later loads are served from memory.
    loader.preload(&[RAW_LEVEL1, RAW_LEVEL2, RAW_DEFAULT_CONFIG], Loader::load_raw)?;

    let level1: serde_json::Value = serde_json::from_slice(&loader.load_raw(RAW_LEVEL1)?.data)
        .map_err(|e| ResourceError::decode(ResourceKind::Raw, "maps/level1.json", e))?;
    println!("{}", level1["name"]);

    match loader.load_raw(RawId(99)) {
        Ok(_) => println!("unexpected"),
        Err(e) => println!("expected failure: {e}"),
    }

    println!("Cache Stats: {:?}", loader.cache_stats(ResourceKind::Raw));
    Ok(())
}
