//! Saving and loading assets, scenes and configuration on disk

use std::fs;

use glam::Vec3;
use tempfile::TempDir;

use firework_engine::persistence::{load_asset, load_scene, save_asset, save_scene};
use firework_engine::{
    EngineConfig, EngineError, FireworkAsset, FireworkEvent, FireworkInstance, FireworkTemplate,
    ParticlePool, Scene, TemplateId, TemplateLibrary,
};

#[test]
fn saved_preset_simulates_like_the_original() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("palm.fwasset");

    let asset = FireworkAsset::from_template(7, FireworkTemplate::palm());
    save_asset(&asset, &path).unwrap();

    let loaded = load_asset(&path).unwrap();
    assert_eq!(loaded.id, 7);
    assert_eq!(loaded.name, "Palm");
    assert_eq!(loaded.metadata, asset.metadata);

    let template = loaded.template.unwrap();
    let original = asset.template.unwrap();
    assert_eq!(template.branch_count(), original.branch_count());
    assert_eq!(template.total_particle_count(), original.total_particle_count());

    // Loaded templates are ready to fire without a manual regenerate
    let mut library = TemplateLibrary::new();
    let id = library.add(template);
    let mut pool = ParticlePool::new(original.total_particle_count() + 100);
    let mut instance = FireworkInstance::new(library.snapshot(id).unwrap(), Vec3::ZERO, 0.0);
    let spawned = instance.update(0.0, 0.0, &mut pool);
    assert!(spawned > 0);
}

#[test]
fn scene_round_trip_preserves_events() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("finale.fwscene");

    let mut scene = Scene::new("Finale");
    scene.set_duration(15.0);
    let mut event = FireworkEvent::new(TemplateId(2), Vec3::new(5.0, 30.0, -2.0), 3.5);
    event.label = "opener".to_string();
    event.enabled = false;
    scene.add_event(event);
    scene.add_event(FireworkEvent::new(TemplateId(1), Vec3::ZERO, 1.0));

    save_scene(&scene, &path).unwrap();
    let loaded = load_scene(&path).unwrap();

    assert_eq!(loaded, scene);
    assert_eq!(loaded.events()[1].label, "opener");
}

#[test]
fn overwriting_keeps_latest_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("show.fwscene");

    save_scene(&Scene::new("First"), &path).unwrap();
    save_scene(&Scene::new("Second"), &path).unwrap();

    assert_eq!(load_scene(&path).unwrap().name, "Second");
    let entries = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn loading_a_scene_as_asset_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene.json");
    save_scene(&Scene::new("Show"), &path).unwrap();

    assert!(matches!(
        load_asset(&path),
        Err(EngineError::UnexpectedFormat { .. })
    ));
}

#[test]
fn corrupt_document_is_json_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.fwasset");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(load_asset(&path), Err(EngineError::Json(_))));
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    fs::write(
        &path,
        r#"
pool_capacity = 2048

[playback]
duration = 12.0
"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.pool_capacity, 2048);
    assert_eq!(config.playback.duration, 12.0);
    assert_eq!(config.preview, EngineConfig::default().preview);
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("engine.toml");
    fs::write(&path, "pool_capacity = 0\n").unwrap();

    assert!(matches!(
        EngineConfig::load(&path),
        Err(EngineError::InvalidConfig(_))
    ));
}
