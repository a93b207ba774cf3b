//! Death-triggered secondary spawning (smoke clusters and sparkle bursts)
//!
//! Sparkles carry `recursion_depth_remaining - 1`, so a cascade ends after at
//! most `depth` generations. Both spawners stop at the first failed
//! allocation.

use glam::{Vec3, Vec4};
use rand::Rng;

use crate::constants::secondary_constants::*;
use crate::particles::{Particle, ParticlePool, TrailState};

/// Spawn everything a dying particle asks for. Returns particles spawned.
pub fn spawn_on_death<R: Rng + ?Sized>(pool: &mut ParticlePool, parent: &Particle, rng: &mut R) -> usize {
    let mut spawned = spawn_smoke(pool, parent, rng);

    if parent.recursion_depth_remaining > 0 {
        let chance = parent.recursion_prob.clamp(0.0, 1.0);
        if rng.gen::<f32>() < chance {
            spawned += spawn_sparkles(pool, parent, rng);
        }
    }

    spawned
}

/// Muted, slowly rising puff at the death position
pub fn spawn_smoke<R: Rng + ?Sized>(pool: &mut ParticlePool, parent: &Particle, rng: &mut R) -> usize {
    let smoke = parent.smoke_amount.clamp(0.0, 1.0);
    if smoke <= 0.0 {
        return 0;
    }

    let count = (SMOKE_MIN_COUNT as f32 + SMOKE_EXTRA_COUNT as f32 * smoke) as usize;
    let lifetime = 0.8 + 1.6 * smoke;
    let color = Vec4::new(
        SMOKE_COLOR[0],
        SMOKE_COLOR[1],
        SMOKE_COLOR[2],
        0.10 + 0.18 * smoke,
    );

    let mut spawned = 0;
    for _ in 0..count {
        let drift = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            0.6 + 0.4 * rng.gen_range(-1.0f32..=1.0).abs(),
            rng.gen_range(-1.0..=1.0),
        );

        let puff = Particle {
            position: parent.position,
            velocity: drift * (0.25 + 0.35 * smoke),
            color,
            base_color: color,
            lifetime,
            original_lifetime: lifetime,
            size: 10.0 + 18.0 * smoke,
            shape_id: parent.shape_id,
            should_fade: true,
            fade_start_ratio: 1.0,
            damping: 1.5 + 2.5 * smoke,
            gravity_scale: 0.05,
            updraft: 0.8,
            trail: TrailState::default(),
            ..Default::default()
        };

        if pool.spawn(puff).is_none() {
            break;
        }
        spawned += 1;
    }

    spawned
}

/// Small burst inheriting the parent's look, one generation shallower
pub fn spawn_sparkles<R: Rng + ?Sized>(pool: &mut ParticlePool, parent: &Particle, rng: &mut R) -> usize {
    let mut color = parent.base_color;
    color.w = parent.color.w.min(1.0);

    let mut trail = parent.trail;
    trail.reset_history();

    let mut spawned = 0;
    for _ in 0..SPARKLE_COUNT {
        let dir = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        let speed = 3.0 + 4.0 * rng.gen::<f32>();

        let sparkle = Particle {
            position: parent.position,
            velocity: dir * speed,
            color,
            base_color: parent.base_color,
            lifetime: SPARKLE_LIFETIME,
            original_lifetime: SPARKLE_LIFETIME,
            size: (parent.size * 0.5).max(SPARKLE_MIN_SIZE),
            shape_id: parent.shape_id,
            should_fade: true,
            fade_start_ratio: 1.0,
            damping: 6.0,
            gravity_scale: 0.25,
            updraft: 0.2,
            trail,
            smoke_amount: 0.0,
            recursion_depth_remaining: parent.recursion_depth_remaining - 1,
            recursion_prob: parent.recursion_prob,
            ..Default::default()
        };

        if pool.spawn(sparkle).is_none() {
            break;
        }
        spawned += 1;
    }

    spawned
}
