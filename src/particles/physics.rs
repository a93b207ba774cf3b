//! Free-flight integration for arena particles
//!
//! Velocity follows `dv/dt = g - k·v` (linear drag under a constant
//! acceleration). The closed form is used instead of stepping the drag term,
//! which keeps heavily damped particles stable at large time steps.

use glam::Vec3;

use crate::constants::physics_constants::{DAMPING_EPSILON, GRAVITY};
use crate::particles::Particle;

/// Constant acceleration acting on a particle: scaled gravity plus updraft
pub fn effective_acceleration(gravity_scale: f32, updraft: f32) -> Vec3 {
    Vec3::new(0.0, GRAVITY * gravity_scale + updraft, 0.0)
}

/// Advance a velocity by `dt` under acceleration `g` and linear drag `k`.
///
/// Falls back to explicit Euler when `k` is effectively zero. Negative
/// damping is treated as zero.
pub fn integrate_velocity(velocity: Vec3, g: Vec3, damping: f32, dt: f32) -> Vec3 {
    let k = damping.max(0.0);

    if k > DAMPING_EPSILON {
        let e = (-k * dt).exp();
        velocity * e + (g / k) * (1.0 - e)
    } else {
        velocity + g * dt
    }
}

/// Integrate velocity then position of one live particle
pub fn integrate(particle: &mut Particle, dt: f32) {
    let g = effective_acceleration(particle.gravity_scale, particle.updraft);
    particle.velocity = integrate_velocity(particle.velocity, g, particle.damping, dt);
    particle.position += particle.velocity * dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_damping_is_euler() {
        let v0 = Vec3::new(1.0, 2.0, 3.0);
        let g = effective_acceleration(1.0, 0.0);
        let v1 = integrate_velocity(v0, g, 0.0, 0.1);

        assert!((v1 - (v0 + g * 0.1)).length() < 1e-6);
    }

    #[test]
    fn test_negative_damping_treated_as_zero() {
        let v0 = Vec3::new(0.0, 5.0, 0.0);
        let g = effective_acceleration(0.35, 0.5);
        let a = integrate_velocity(v0, g, -3.0, 0.05);
        let b = integrate_velocity(v0, g, 0.0, 0.05);
        assert!((a - b).length() < 1e-6);
    }

    #[test]
    fn test_heavy_damping_stays_bounded_at_large_dt() {
        // Euler would overshoot with k*dt = 50
        let v0 = Vec3::new(100.0, 0.0, 0.0);
        let g = effective_acceleration(1.0, 0.0);
        let v1 = integrate_velocity(v0, g, 50.0, 1.0);

        assert!(v1.x.abs() < 1e-6);
        // Converges to terminal velocity g/k
        assert!((v1.y - GRAVITY / 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_is_identity() {
        let v0 = Vec3::new(3.0, -1.0, 2.0);
        let g = effective_acceleration(0.35, 0.5);
        let v1 = integrate_velocity(v0, g, 10.0, 0.0);
        assert!((v1 - v0).length() < 1e-6);
    }

    #[test]
    fn test_updraft_offsets_gravity() {
        let g = effective_acceleration(0.0, 0.8);
        assert_eq!(g, Vec3::new(0.0, 0.8, 0.0));
    }

    #[test]
    fn test_integrate_moves_position_with_new_velocity() {
        let mut p = Particle {
            velocity: Vec3::new(1.0, 0.0, 0.0),
            gravity_scale: 0.0,
            updraft: 0.0,
            damping: 0.0,
            ..Default::default()
        };
        integrate(&mut p, 0.5);
        assert!((p.position - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-6);
    }
}
