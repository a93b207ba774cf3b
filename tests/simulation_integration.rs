//! End-to-end simulation behaviour through the public API
//!
//! Covers the arena contract, emitter scheduling, death-triggered secondaries
//! and a full scene playback through the editor session.

use std::sync::Arc;

use glam::{Vec3, Vec4};

use firework_engine::fireworks::generate_directions;
use firework_engine::{
    prepare_render_data, BranchLayout, EditorCommand, EditorMode, EditorSession, EmissionState,
    EngineConfig, FireworkEvent, FireworkInstance, FireworkTemplate, InstanceManager, Particle,
    ParticleGpuData, ParticlePool,
};

const GRAVITY: f32 = -9.81;

fn single_branch(particles: i32, emission_duration: f32) -> Arc<FireworkTemplate> {
    let mut t = FireworkTemplate::new("Single");
    t.layout.grid_x = 1;
    t.layout.grid_y = 1;
    t.branch.particles_per_branch = particles;
    t.branch.emission_duration = emission_duration;
    t.branch.smoke_amount = 0.0;
    t.regenerate_branches();
    Arc::new(t)
}

#[test]
fn arena_allocates_exactly_capacity_then_reuses_from_zero() {
    let capacity = 256;
    let mut pool = ParticlePool::new(capacity);

    let granted = (0..capacity).filter_map(|_| pool.allocate()).count();
    assert_eq!(granted, capacity);
    assert!(pool.allocate().is_none());
    assert_eq!(pool.active_count(), capacity);

    pool.clear_all();
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.allocate(), Some(0));
}

#[test]
fn zero_dt_step_is_identity() {
    let mut pool = ParticlePool::new(8);
    let index = pool
        .spawn(Particle {
            velocity: Vec3::new(1.0, 2.0, 3.0),
            damping: 2.0,
            lifetime: 1.0,
            should_fade: false,
            ..Default::default()
        })
        .unwrap();
    let before = pool.get(index).unwrap().clone();

    pool.update(0.0);

    let after = pool.get(index).unwrap();
    assert_eq!(after.position, before.position);
    assert_eq!(after.velocity, before.velocity);
    assert_eq!(after.lifetime, before.lifetime);
}

#[test]
fn undamped_particle_follows_euler() {
    let mut pool = ParticlePool::new(4);
    let index = pool
        .spawn(Particle {
            velocity: Vec3::new(2.0, 5.0, 0.0),
            damping: 0.0,
            gravity_scale: 1.0,
            updraft: 0.0,
            lifetime: 5.0,
            ..Default::default()
        })
        .unwrap();

    let dt = 0.1;
    pool.update(dt);

    let p = pool.get(index).unwrap();
    let expected_v = Vec3::new(2.0, 5.0 + GRAVITY * dt, 0.0);
    assert!((p.velocity - expected_v).length() < 1e-5);
    assert!((p.position - expected_v * dt).length() < 1e-5);
}

#[test]
fn full_grid_directions_are_unit_and_inside_band() {
    let layout = BranchLayout {
        grid_x: 8,
        grid_y: 8,
        azimuth_min: -45.0,
        azimuth_max: 45.0,
        elevation_min: 10.0,
        elevation_max: 60.0,
        randomness: 0.0,
    };

    let directions = generate_directions(&layout);
    assert_eq!(directions.len(), 64);

    for d in directions {
        assert!((d.length() - 1.0).abs() < 1e-5);
        let elevation = d.y.asin().to_degrees();
        assert!((10.0 - 1e-3..=60.0 + 1e-3).contains(&elevation));
        let azimuth = d.z.atan2(d.x).to_degrees();
        assert!((-45.0 - 1e-2..=45.0 + 1e-2).contains(&azimuth), "azimuth {azimuth}");
    }
}

#[test]
fn regenerating_twice_keeps_structure() {
    let mut template = FireworkTemplate::chrysanthemum();
    template.regenerate_branches();
    let first: Vec<_> = template.generated_branches().to_vec();
    template.regenerate_branches();
    let second = template.generated_branches();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second) {
        assert_eq!(a.params.particles_per_branch, b.params.particles_per_branch);
        assert_eq!(a.params.should_fade, b.params.should_fade);
    }
}

#[test]
fn burst_emitter_spawns_whole_branch_in_one_step() {
    let mut pool = ParticlePool::new(1000);
    let mut instance = FireworkInstance::new(single_branch(40, 0.0), Vec3::ZERO, 0.0);

    let spawned = instance.update(0.0, 1.0 / 60.0, &mut pool);

    assert_eq!(spawned, 40);
    assert_eq!(pool.active_count(), 40);
    assert_eq!(instance.state(), EmissionState::Finished);
}

#[test]
fn timed_emitter_spawns_half_after_half_duration() {
    let mut pool = ParticlePool::new(1000);
    let mut instance = FireworkInstance::new(single_branch(100, 1.0), Vec3::ZERO, 0.0);

    let spawned = instance.update(0.0, 0.5, &mut pool);

    assert_eq!(spawned, 50);
    assert_eq!(instance.state(), EmissionState::Emitting);
}

#[test]
fn expiring_particle_leaves_smoke() {
    let mut pool = ParticlePool::new(64);
    let index = pool
        .spawn(Particle {
            lifetime: 0.1,
            original_lifetime: 0.1,
            smoke_amount: 1.0,
            ..Default::default()
        })
        .unwrap();

    let stats = pool.update(0.2);

    assert!(!pool.get(index).unwrap().active);
    assert_eq!(stats.expired, 1);
    assert!((3..=15).contains(&stats.secondary_spawned));
    assert!((3..=15).contains(&pool.active_count()));
}

#[test]
fn full_arena_degrades_to_fewer_particles() {
    let mut pool = ParticlePool::new(30);
    let mut manager = InstanceManager::new();
    manager.add(FireworkInstance::new(single_branch(40, 0.0), Vec3::ZERO, 0.0));
    manager.add(FireworkInstance::new(single_branch(40, 0.5), Vec3::ZERO, 0.0));

    let mut spawned = 0;
    for step in 0..120 {
        spawned += manager.update(step as f32 / 60.0, 1.0 / 60.0, &mut pool);
        pool.update(1.0 / 60.0);
    }

    assert_eq!(spawned, 30);
    assert_eq!(pool.active_count(), 30);
}

#[test]
fn render_extraction_matches_active_particles() {
    let mut pool = ParticlePool::new(16);
    let mut instance = FireworkInstance::new(single_branch(5, 0.0), Vec3::new(0.0, 10.0, 0.0), 0.0);
    instance.update(0.0, 0.016, &mut pool);

    let mut buffer = Vec::new();
    prepare_render_data(&pool, &mut buffer);

    assert_eq!(buffer.len(), 5);
    assert_eq!(std::mem::size_of::<ParticleGpuData>(), 48);
    assert!(buffer.iter().all(|p| p.position[1] == 10.0));
    let bytes: &[u8] = bytemuck::cast_slice(&buffer);
    assert_eq!(bytes.len(), 5 * 48);
}

#[test]
fn scene_show_plays_every_event_once() {
    let config = EngineConfig {
        pool_capacity: 20_000,
        ..EngineConfig::default()
    };
    let mut session = EditorSession::with_presets(config);
    let ids: Vec<_> = session.library.ids().collect();
    for (i, id) in ids.iter().enumerate() {
        session
            .scene
            .add_event(FireworkEvent::new(*id, Vec3::new(i as f32 * 10.0, 30.0, 0.0), 0.2 * i as f32 + 0.1));
    }
    session.scene.set_duration(3.0);

    session.handle(EditorCommand::SetMode(EditorMode::Scene));
    session.handle(EditorCommand::Play);

    let dt = 1.0 / 60.0;
    let mut now = 0.0;
    let mut dispatched = 0;
    for _ in 0..150 {
        now += dt;
        dispatched += session.step(now, dt).dispatched;
    }

    assert_eq!(dispatched, ids.len());
    assert!(session.player.timeline.is_playing());
    assert_eq!(session.manager.len(), ids.len());
    assert!(session.manager.instances().iter().all(|i| i.is_triggered()));

    // Past the end playback stops and nothing dispatches again
    for _ in 0..90 {
        now += dt;
        dispatched += session.step(now, dt).dispatched;
    }
    assert_eq!(dispatched, ids.len());
    assert!(!session.player.timeline.is_playing());
}

#[test]
fn uniform_color_reaches_particles() {
    let mut template = FireworkTemplate::new("Red");
    template.layout.grid_x = 2;
    template.layout.grid_y = 1;
    template.color_scheme.uniform_color = Vec4::new(1.0, 0.0, 0.0, 1.0);
    template.color_scheme.saturation_variance = 0.0;
    template.color_scheme.brightness_variance = 0.0;
    template.branch.particles_per_branch = 3;
    template.regenerate_branches();

    let mut pool = ParticlePool::new(16);
    let mut instance = FireworkInstance::new(Arc::new(template), Vec3::ZERO, 0.0);
    instance.update(0.0, 0.0, &mut pool);

    let active: Vec<_> = pool.all().iter().filter(|p| p.active).collect();
    assert_eq!(active.len(), 6);
    for p in active {
        assert!((p.base_color - Vec4::new(1.0, 0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
