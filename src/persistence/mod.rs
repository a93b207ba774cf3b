//! Persistence for firework assets and scenes
//!
//! Documents are versioned JSON. Only authoring data is stored; generated
//! branches are rebuilt on load.

pub mod asset;
pub mod error;

pub use asset::{
    asset_from_str, asset_to_string, load_asset, load_scene, pack_rgba, save_asset, save_scene,
    scene_from_str, scene_to_string, AssetMetadata, FireworkAsset, ASSET_VERSION, SCENE_VERSION,
};
pub use error::PersistenceErrorContext;
