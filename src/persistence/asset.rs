//! Asset and scene documents
//!
//! Both file kinds are JSON objects with a `format`/`version` header next to
//! the payload. Files are written to a sibling temporary path and renamed into
//! place so a failed save never truncates an existing document.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec4;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::fireworks::{FireworkTemplate, VisualMode};
use crate::persistence::error::{unexpected_format, version_mismatch, PersistenceErrorContext};
use crate::scene::Scene;

pub const ASSET_FORMAT: &str = "fwasset";
pub const SCENE_FORMAT: &str = "fwscene";
pub const ASSET_VERSION: u32 = 1;
pub const SCENE_VERSION: u32 = 1;

/// Authoring hints stored next to a template; never read by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMetadata {
    /// Default preview length
    pub typical_duration_sec: f32,
    /// Preview framing radius in world units
    pub estimated_max_radius: f32,
    /// Swatch colour packed as `0xRRGGBBAA`
    pub dominant_color_rgba: u32,
    pub tags: Vec<String>,
}

impl Default for AssetMetadata {
    fn default() -> Self {
        Self {
            typical_duration_sec: 2.0,
            estimated_max_radius: 1.0,
            dominant_color_rgba: 0xFFFF_FFFF,
            tags: Vec::new(),
        }
    }
}

impl AssetMetadata {
    /// Derive preview hints from a template's parameters
    pub fn estimate(template: &FireworkTemplate) -> Self {
        let branch = &template.branch;
        let lifetime = template.physics.limit_lifetime(branch.lifetime).max(0.0);
        let speed = template
            .physics
            .limit_speed(branch.initial_speed * (1.0 + branch.speed_variance.max(0.0)));

        // Distance covered under linear drag, ignoring gravity
        let k = branch.damping.max(0.0);
        let radius = if k > 1e-6 {
            speed / k * (1.0 - (-k * lifetime).exp())
        } else {
            speed * lifetime
        };

        let color = template
            .generated_branches()
            .first()
            .map(|b| b.color)
            .unwrap_or(template.color_scheme.uniform_color);

        let mut tags = Vec::new();
        if branch.visual_mode == VisualMode::Sparkle {
            tags.push("sparkle".to_string());
        }
        if branch.smoke_amount > 0.0 {
            tags.push("smoke".to_string());
        }
        if branch.trail_enabled {
            tags.push("trail".to_string());
        }
        if branch.recursion_depth > 0 && branch.recursion_prob > 0.0 {
            tags.push("crackle".to_string());
        }

        Self {
            typical_duration_sec: branch.emission_duration.max(0.0) + lifetime,
            estimated_max_radius: radius.max(0.0),
            dominant_color_rgba: pack_rgba(color),
            tags,
        }
    }
}

/// Pack a linear `[0,1]` colour as `0xRRGGBBAA`
pub fn pack_rgba(color: Vec4) -> u32 {
    let [r, g, b, a] = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0)
        .round()
        .to_array()
        .map(|c| c as u32);
    (r << 24) | (g << 16) | (b << 8) | a
}

/// Serializable authoring unit wrapping a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireworkAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub metadata: AssetMetadata,
    /// An asset without a template is still a valid document
    pub template: Option<FireworkTemplate>,
}

impl FireworkAsset {
    pub fn new(id: u64, name: impl Into<String>, template: Option<FireworkTemplate>) -> Self {
        Self {
            id,
            name: name.into(),
            metadata: AssetMetadata::default(),
            template,
        }
    }

    /// Wrap a template, estimating metadata from it
    pub fn from_template(id: u64, template: FireworkTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            metadata: AssetMetadata::estimate(&template),
            template: Some(template),
        }
    }
}

#[derive(Deserialize)]
struct Header {
    format: String,
    version: u32,
}

#[derive(Serialize)]
struct DocumentRef<'a, T> {
    format: &'a str,
    version: u32,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize, Deserialize)]
struct AssetBody<A> {
    asset: A,
}

#[derive(Serialize, Deserialize)]
struct SceneBody<S> {
    scene: S,
}

fn check_header(raw: &str, format: &str, current: u32) -> EngineResult<()> {
    let header: Header = serde_json::from_str(raw)?;
    if header.format != format {
        return Err(unexpected_format(format, header.format));
    }
    if header.version == 0 || header.version > current {
        return Err(version_mismatch(format, current, header.version));
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(raw: &str, format: &str, current: u32) -> EngineResult<T> {
    check_header(raw, format, current)?;
    // Header fields are ignored by the body type
    Ok(serde_json::from_str(raw)?)
}

fn encode<T: Serialize>(body: &T, format: &str, version: u32) -> EngineResult<String> {
    let document = DocumentRef {
        format,
        version,
        body,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

fn write_atomic(path: &Path, contents: &str) -> EngineResult<()> {
    let mut temp = PathBuf::from(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    temp.set_file_name(format!(".{}.tmp", file_name));

    fs::write(&temp, contents).persistence_context(&temp, "Save")?;
    fs::rename(&temp, path).persistence_context(path, "Save")
}

/// Encode an asset document
pub fn asset_to_string(asset: &FireworkAsset) -> EngineResult<String> {
    encode(&AssetBody { asset }, ASSET_FORMAT, ASSET_VERSION)
}

/// Decode an asset document; the template's branches are regenerated
pub fn asset_from_str(raw: &str) -> EngineResult<FireworkAsset> {
    let body: AssetBody<FireworkAsset> = decode(raw, ASSET_FORMAT, ASSET_VERSION)?;
    let mut asset = body.asset;
    if let Some(template) = asset.template.as_mut() {
        template.regenerate_branches();
    }
    Ok(asset)
}

/// Encode a scene document
pub fn scene_to_string(scene: &Scene) -> EngineResult<String> {
    encode(&SceneBody { scene }, SCENE_FORMAT, SCENE_VERSION)
}

/// Decode a scene document; events are re-sorted by trigger time
pub fn scene_from_str(raw: &str) -> EngineResult<Scene> {
    let body: SceneBody<Scene> = decode(raw, SCENE_FORMAT, SCENE_VERSION)?;
    let mut scene = body.scene;
    let duration = scene.duration();
    scene.set_duration(duration);
    scene.sort_by_time();
    Ok(scene)
}

pub fn save_asset(asset: &FireworkAsset, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    write_atomic(path, &asset_to_string(asset)?)?;
    log::info!("Saved asset '{}' to {}", asset.name, path.display());
    Ok(())
}

pub fn load_asset(path: impl AsRef<Path>) -> EngineResult<FireworkAsset> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).persistence_context(path, "Load")?;
    let asset = asset_from_str(&raw)?;
    log::info!("Loaded asset '{}' from {}", asset.name, path.display());
    Ok(asset)
}

pub fn save_scene(scene: &Scene, path: impl AsRef<Path>) -> EngineResult<()> {
    let path = path.as_ref();
    write_atomic(path, &scene_to_string(scene)?)?;
    log::info!(
        "Saved scene '{}' ({} events) to {}",
        scene.name,
        scene.events().len(),
        path.display()
    );
    Ok(())
}

pub fn load_scene(path: impl AsRef<Path>) -> EngineResult<Scene> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).persistence_context(path, "Load")?;
    let scene = scene_from_str(&raw)?;
    log::info!(
        "Loaded scene '{}' ({} events) from {}",
        scene.name,
        scene.events().len(),
        path.display()
    );
    Ok(scene)
}
