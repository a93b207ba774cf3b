/// Headless firework show runner
/// Plays a short demonstration scene with a fixed time step and logs
/// arena statistics once per simulated second

use anyhow::{Context, Result};
use glam::Vec3;

use firework_engine::{
    EditorCommand, EditorMode, EditorSession, EngineConfig, FireworkEvent, TemplateId,
};

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Ok(EngineConfig::default()),
    }
}

/// One event per preset, staggered left to right
fn build_demo_scene(session: &mut EditorSession) {
    let ids: Vec<TemplateId> = session.library.ids().collect();
    let count = ids.len().max(1) as f32;

    for (i, id) in ids.into_iter().enumerate() {
        let x = (i as f32 - (count - 1.0) * 0.5) * 15.0;
        let mut event = FireworkEvent::new(id, Vec3::new(x, 40.0, 0.0), 0.25 + i as f32 * 0.6);
        event.label = session.library.name(id).unwrap_or("firework").to_string();
        session.scene.add_event(event);
    }

    session.scene.name = "Demo Show".to_string();
}

fn main() -> Result<()> {
    let config = load_config()?;

    if let Err(e) = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .try_init()
    {
        log::debug!("Logger already initialised: {}", e);
    }

    log::info!("Starting firework engine with {} particle slots", config.pool_capacity);

    let fixed_dt = config.playback.fixed_dt;
    let duration = config.playback.duration;
    let mut session = EditorSession::with_presets(config);

    build_demo_scene(&mut session);
    session.scene.set_duration(duration);
    log::info!(
        "Scene '{}': {} events over {:.1}s",
        session.scene.name,
        session.scene.events().len(),
        session.scene.duration()
    );

    session.handle(EditorCommand::SetMode(EditorMode::Scene));
    session.handle(EditorCommand::Play);

    let steps = (duration / fixed_dt).ceil() as u32;
    let steps_per_second = (1.0 / fixed_dt).round().max(1.0) as u32;
    let mut now = 0.0f32;
    let mut expired = 0;
    let mut secondaries = 0;
    let mut peak = 0;

    for step in 1..=steps {
        now += fixed_dt;
        let stats = session.step(now, fixed_dt);
        expired += stats.pool.expired;
        secondaries += stats.pool.secondary_spawned;
        peak = peak.max(stats.pool.active_particles);

        if stats.dispatched > 0 {
            log::info!("t={:.2}s dispatched {} firework(s)", now, stats.dispatched);
        }

        if step % steps_per_second == 0 {
            log::info!(
                "t={:.1}s active={} expired={} secondary={} instances={} finished={}",
                now,
                stats.pool.active_particles,
                expired,
                secondaries,
                session.manager.len(),
                session.manager.finished_count()
            );
            expired = 0;
            secondaries = 0;
        }
    }

    log::info!(
        "Show finished: peak {} of {} slots in use",
        peak,
        session.pool.capacity()
    );
    Ok(())
}
