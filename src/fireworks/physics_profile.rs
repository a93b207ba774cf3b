use serde::{Deserialize, Serialize};

/// Template-wide physics settings and safety limits.
///
/// Per-particle gravity scale, updraft and damping drive integration; the
/// profile caps what emission is allowed to hand the arena.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsProfile {
    /// Downward acceleration (9.8 is realistic)
    pub gravity: f32,
    /// 0 compensates to keep branch length, 1 is natural
    pub gravity_curve: f32,
    /// Air resistance (0-1)
    pub drag_coefficient: f32,
    pub turbulence_strength: f32,
    /// Turbulence rate (Hz)
    pub turbulence_frequency: f32,
    /// Initial speed cap (m/s), ignored when <= 0
    pub max_speed: f32,
    /// Particle lifetime cap (seconds), ignored when <= 0
    pub max_lifetime: f32,
}

impl Default for PhysicsProfile {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            gravity_curve: 0.5,
            drag_coefficient: 0.1,
            turbulence_strength: 0.05,
            turbulence_frequency: 1.0,
            max_speed: 100.0,
            max_lifetime: 10.0,
        }
    }
}

impl PhysicsProfile {
    pub fn realistic() -> Self {
        Self {
            gravity: 9.8,
            gravity_curve: 1.0,
            drag_coefficient: 0.3,
            ..Default::default()
        }
    }

    pub fn artistic() -> Self {
        Self {
            gravity: 5.0,
            gravity_curve: 0.0,
            drag_coefficient: 0.05,
            ..Default::default()
        }
    }

    pub fn zero_gravity() -> Self {
        Self {
            gravity: 0.0,
            drag_coefficient: 0.0,
            turbulence_strength: 0.0,
            ..Default::default()
        }
    }

    /// Clamp an initial speed to `max_speed`
    pub fn limit_speed(&self, speed: f32) -> f32 {
        if self.max_speed > 0.0 {
            speed.min(self.max_speed)
        } else {
            speed
        }
    }

    /// Clamp a lifetime to `max_lifetime`
    pub fn limit_lifetime(&self, lifetime: f32) -> f32 {
        if self.max_lifetime > 0.0 {
            lifetime.min(self.max_lifetime)
        } else {
            lifetime
        }
    }
}
