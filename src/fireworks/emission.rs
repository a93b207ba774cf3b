//! Branch emission
//!
//! Turns a generated branch into live arena particles. Spawn order matters:
//! early particles (the head) are biased toward full speed, late ones (the
//! tail) are slowed by `back_speed_scale`, which is what gives timed branches
//! their comet shape.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::constants::emission_constants::{SPEED_MULTIPLIER_BASE, SPEED_MULTIPLIER_RANGE};
use crate::fireworks::{GeneratedBranch, PhysicsProfile, VisualMode};
use crate::particles::{trail, Particle, ParticlePool, TrailState};

/// Spawn particle `spawn_index` of `total_spawns` for a branch.
///
/// Returns `None` when the arena is full; nothing is written in that case.
pub fn emit_particle(
    branch: &GeneratedBranch,
    physics: &PhysicsProfile,
    world_position: Vec3,
    pool: &mut ParticlePool,
    spawn_index: usize,
    total_spawns: usize,
) -> Option<usize> {
    let index = pool.allocate()?;

    let denom = if total_spawns > 1 {
        (total_spawns - 1) as f32
    } else {
        1.0
    };
    let progress = (spawn_index as f32 / denom).clamp(0.0, 1.0);

    let particle = init_particle(branch, physics, world_position, progress, &mut rand::thread_rng());
    if let Some(slot) = pool.get_mut(index) {
        *slot = particle;
    }
    Some(index)
}

/// Spawn a whole branch at once. Stops at the first failed allocation.
pub fn emit_branch(
    branch: &GeneratedBranch,
    physics: &PhysicsProfile,
    world_position: Vec3,
    pool: &mut ParticlePool,
) -> Vec<usize> {
    let total = branch.params.particles_per_branch.max(0) as usize;
    let mut indices = Vec::with_capacity(total);

    for spawn_index in 0..total {
        match emit_particle(branch, physics, world_position, pool, spawn_index, total) {
            Some(index) => indices.push(index),
            None => {
                log::trace!("Particle pool exhausted after {} of {} spawns", spawn_index, total);
                break;
            }
        }
    }

    indices
}

/// Build a fully initialized, active particle for a spawn at `progress` (0 = head, 1 = tail)
pub fn init_particle<R: Rng + ?Sized>(
    branch: &GeneratedBranch,
    physics: &PhysicsProfile,
    world_position: Vec3,
    progress: f32,
    rng: &mut R,
) -> Particle {
    let params = &branch.params;
    let sparkle = params.visual_mode == VisualMode::Sparkle;

    // Speed: uniform variance times the head/tail multiplier
    let mut speed_variance = params.speed_variance;
    if sparkle {
        speed_variance *= 1.0 + params.sparkle_speed_jitter.max(0.0);
    }
    let variance_multiplier = 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * speed_variance;

    let is_front = progress <= params.front_portion.clamp(0.0, 1.0);
    let mut u_speed = rng.gen::<f32>();
    if is_front {
        u_speed = biased(u_speed, params.front_speed_bias.max(1.0));
    } else {
        u_speed *= params.back_speed_scale.clamp(0.0, 1.0);
    }
    let order_multiplier = SPEED_MULTIPLIER_BASE + SPEED_MULTIPLIER_RANGE * u_speed;

    let speed = params.initial_speed * variance_multiplier * order_multiplier;
    let mut velocity = branch.direction * speed;

    // Apply angular spread
    let mut spread = params.angular_spread;
    if sparkle {
        spread *= params.sparkle_spread_mult.max(0.0);
    }
    if spread > 0.0 {
        velocity = random_in_cone(branch.direction, spread * 0.5, rng) * velocity.length();
    }

    if sparkle && params.sparkle_speed_jitter > 0.0 {
        velocity *= 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * params.sparkle_speed_jitter;
    }

    // Safety limit from the physics profile
    let magnitude = velocity.length();
    let limited = physics.limit_speed(magnitude);
    if limited < magnitude {
        velocity *= limited / magnitude;
    }

    let mut damping = params.damping;
    if params.damping_variance > 0.0 {
        damping *= 1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * params.damping_variance;
    }

    let size = params.particle_size * (1.0 + (rng.gen::<f32>() - 0.5) * 2.0 * params.size_variance);
    let lifetime = physics.limit_lifetime(params.lifetime);

    let trail = TrailState {
        enabled: params.trail_enabled,
        width: params.trail_width,
        duration: params.trail_duration,
        opacity: params.trail_opacity,
        falloff_pow: params.trail_falloff_pow,
        sample_period: trail::sample_period_for(params.trail_enabled, params.trail_duration),
        sample_accum: 0.0,
        head: 0,
        count: 0,
    };

    Particle {
        position: world_position,
        velocity,
        color: branch.color,
        base_color: branch.color,
        lifetime,
        original_lifetime: lifetime,
        size,
        active: true,
        shape_id: params.shape_id,
        should_fade: params.should_fade,
        fade_start_ratio: params.fade_start_ratio,
        damping: damping.max(0.0),
        gravity_scale: params.gravity_scale,
        updraft: params.updraft,
        in_branch_phase: false,
        branch_phase_time: 0.0,
        trail,
        smoke_amount: params.smoke_amount.clamp(0.0, 1.0),
        recursion_depth_remaining: params.recursion_depth.max(0),
        recursion_prob: params.recursion_prob.clamp(0.0, 1.0),
    }
}

/// `1 - (1 - u)^bias`; a bias above 1 pushes `u` toward 1
pub fn biased(u: f32, bias: f32) -> f32 {
    if bias <= 1.0 {
        u
    } else {
        1.0 - (1.0 - u).powf(bias)
    }
}

/// Random unit vector within `half_angle_deg` of `direction`
pub fn random_in_cone<R: Rng + ?Sized>(direction: Vec3, half_angle_deg: f32, rng: &mut R) -> Vec3 {
    let max_angle = half_angle_deg.to_radians().max(0.0);
    let angle = if max_angle > 0.0 {
        rng.gen_range(0.0..max_angle)
    } else {
        0.0
    };
    let azimuth = rng.gen_range(0.0..TAU);

    let perpendicular = if direction.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
    let tangent = direction.cross(perpendicular).normalize_or_zero();
    let bitangent = direction.cross(tangent);

    let (sin_a, cos_a) = angle.sin_cos();
    let result = cos_a * direction
        + sin_a * azimuth.cos() * tangent
        + sin_a * azimuth.sin() * bitangent;
    result.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fireworks::BranchDescriptor;
    use glam::Vec4;

    fn branch(params: BranchDescriptor) -> GeneratedBranch {
        GeneratedBranch {
            direction: Vec3::Y,
            color: Vec4::new(1.0, 0.5, 0.0, 1.0),
            params,
        }
    }

    #[test]
    fn test_emit_branch_spawns_all() {
        let mut pool = ParticlePool::new(100);
        let b = branch(BranchDescriptor::default());
        let indices = emit_branch(&b, &PhysicsProfile::default(), Vec3::ZERO, &mut pool);

        assert_eq!(indices.len(), 40);
        assert_eq!(pool.active_count(), 40);
        for &i in &indices {
            let p = pool.get(i).unwrap();
            assert!(p.active);
            assert_eq!(p.color, b.color);
            assert_eq!(p.base_color, b.color);
            assert_eq!(p.lifetime, 2.5);
        }
    }

    #[test]
    fn test_emit_branch_stops_when_full() {
        let mut pool = ParticlePool::new(10);
        let b = branch(BranchDescriptor::default());
        let indices = emit_branch(&b, &PhysicsProfile::default(), Vec3::ZERO, &mut pool);
        assert_eq!(indices.len(), 10);
        assert!(emit_particle(&b, &PhysicsProfile::default(), Vec3::ZERO, &mut pool, 0, 1).is_none());
    }

    #[test]
    fn test_speed_bounds_without_spread() {
        let params = BranchDescriptor {
            initial_speed: 10.0,
            speed_variance: 0.0,
            angular_spread: 0.0,
            ..Default::default()
        };
        let b = branch(params);
        let mut rng = rand::thread_rng();

        for i in 0..200 {
            let progress = i as f32 / 199.0;
            let p = init_particle(&b, &PhysicsProfile::default(), Vec3::ZERO, progress, &mut rng);
            let speed = p.velocity.length();
            assert!((p.velocity.normalize() - Vec3::Y).length() < 1e-4);

            if progress <= 0.85 {
                assert!(speed >= 6.0 - 1e-3 && speed <= 14.0 + 1e-3, "head speed {}", speed);
            } else {
                // Tail: 0.6 + 0.8 * u * 0.55
                assert!(speed >= 6.0 - 1e-3 && speed <= 10.4 + 1e-3, "tail speed {}", speed);
            }
        }
    }

    fn max_angle_and_speed_range(b: &GeneratedBranch, samples: usize) -> (f32, f32, f32) {
        let mut rng = rand::thread_rng();
        let mut max_angle = 0.0f32;
        let mut min_speed = f32::MAX;
        let mut max_speed = 0.0f32;

        for i in 0..samples {
            let progress = i as f32 / (samples - 1) as f32;
            let p = init_particle(b, &PhysicsProfile::default(), Vec3::ZERO, progress, &mut rng);
            let speed = p.velocity.length();
            let angle = (p.velocity / speed).dot(b.direction).clamp(-1.0, 1.0).acos().to_degrees();
            max_angle = max_angle.max(angle);
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);
        }

        (max_angle, min_speed, max_speed)
    }

    #[test]
    fn test_sparkle_widens_spread_and_jitters_speed() {
        let params = BranchDescriptor {
            visual_mode: VisualMode::Sparkle,
            angular_spread: 20.0,
            speed_variance: 0.0,
            initial_speed: 10.0,
            ..Default::default()
        };
        let b = branch(params.clone());
        let (max_angle, min_speed, max_speed) = max_angle_and_speed_range(&b, 2000);

        // Half of 20 * 1.5
        assert!(max_angle <= 15.0 + 1e-2, "sparkle angle {}", max_angle);
        assert!(max_angle > 10.0, "sparkle angle {}", max_angle);
        // 0.6..1.4 order multiplier times 1 +- 0.15 jitter
        assert!(min_speed >= 6.0 * 0.85 - 1e-3, "sparkle min speed {}", min_speed);
        assert!(max_speed <= 14.0 * 1.15 + 1e-3, "sparkle max speed {}", max_speed);

        let comet = branch(BranchDescriptor {
            visual_mode: VisualMode::Comet,
            ..params
        });
        let (max_angle, min_speed, max_speed) = max_angle_and_speed_range(&comet, 2000);
        assert!(max_angle <= 10.0 + 1e-2, "comet angle {}", max_angle);
        assert!(min_speed >= 6.0 - 1e-3 && max_speed <= 14.0 + 1e-3);
    }

    #[test]
    fn test_speed_clamped_by_profile() {
        let params = BranchDescriptor {
            initial_speed: 500.0,
            ..Default::default()
        };
        let b = branch(params);
        let p = init_particle(&b, &PhysicsProfile::default(), Vec3::ZERO, 0.0, &mut rand::thread_rng());
        assert!(p.velocity.length() <= 100.0 + 1e-3);
    }

    #[test]
    fn test_fields_clamped() {
        let params = BranchDescriptor {
            smoke_amount: 3.0,
            recursion_depth: -2,
            recursion_prob: -1.0,
            damping: -5.0,
            damping_variance: 0.0,
            ..Default::default()
        };
        let p = init_particle(&branch(params), &PhysicsProfile::default(), Vec3::ZERO, 0.0, &mut rand::thread_rng());
        assert_eq!(p.smoke_amount, 1.0);
        assert_eq!(p.recursion_depth_remaining, 0);
        assert_eq!(p.recursion_prob, 0.0);
        assert_eq!(p.damping, 0.0);
    }

    #[test]
    fn test_trail_sample_period() {
        let params = BranchDescriptor {
            trail_enabled: true,
            trail_duration: 0.3,
            ..Default::default()
        };
        let p = init_particle(&branch(params), &PhysicsProfile::default(), Vec3::ZERO, 0.0, &mut rand::thread_rng());
        assert!(p.trail.enabled);
        assert!((p.trail.sample_period - 0.02).abs() < 1e-6);
        assert_eq!(p.trail.count, 0);
    }

    #[test]
    fn test_biased_pushes_toward_one() {
        assert_eq!(biased(0.3, 1.0), 0.3);
        assert!(biased(0.3, 4.0) > 0.3);
        assert_eq!(biased(1.0, 4.0), 1.0);
        assert_eq!(biased(0.0, 4.0), 0.0);
    }

    #[test]
    fn test_cone_within_half_angle() {
        let mut rng = rand::thread_rng();
        for dir in [Vec3::Y, Vec3::X, Vec3::new(0.3, 0.95, 0.1).normalize()] {
            for _ in 0..100 {
                let v = random_in_cone(dir, 15.0, &mut rng);
                assert!((v.length() - 1.0).abs() < 1e-5);
                let angle = v.dot(dir).clamp(-1.0, 1.0).acos().to_degrees();
                assert!(angle <= 15.0 + 1e-2, "angle {}", angle);
            }
        }
    }
}
