use glam::{Vec3, Vec4};

use crate::constants::trail_constants;
use crate::shapes::ShapeId;

/// A single arena slot. Inactive slots keep their last values and are
/// overwritten wholesale by the next emission that claims them.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Position in world space
    pub position: Vec3,
    /// Velocity (m/s)
    pub velocity: Vec3,
    /// Current color (RGBA), alpha driven by the fade policy
    pub color: Vec4,
    /// Color at spawn, used as the fade reference
    pub base_color: Vec4,
    /// Remaining lifetime (seconds)
    pub lifetime: f32,
    /// Lifetime at spawn (seconds)
    pub original_lifetime: f32,
    /// Render size in pixels
    pub size: f32,
    /// Whether the slot holds a live particle
    pub active: bool,
    /// Index into the shape registry
    pub shape_id: ShapeId,

    /// Fade alpha out from `fade_start_ratio` of remaining life
    pub should_fade: bool,
    /// Life ratio (0-1) at which fading begins
    pub fade_start_ratio: f32,

    /// Linear drag coefficient (1/s)
    pub damping: f32,
    /// Multiplier on base gravity
    pub gravity_scale: f32,
    /// Extra vertical acceleration (m/s²)
    pub updraft: f32,

    /// Set while the particle is still in its branch phase
    pub in_branch_phase: bool,
    /// Remaining branch phase time (seconds)
    pub branch_phase_time: f32,

    /// Trail ribbon settings and ring-buffer cursor
    pub trail: TrailState,

    /// Smoke cluster intensity on death (0-1)
    pub smoke_amount: f32,
    /// Remaining sparkle generations
    pub recursion_depth_remaining: i32,
    /// Chance (0-1) of a sparkle burst on death
    pub recursion_prob: f32,
}

/// Per-particle trail parameters plus the cursor into the arena's ring buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailState {
    pub enabled: bool,
    /// Ribbon width; values <= 1 are a fraction of the particle size
    pub width: f32,
    /// Seconds of history the ribbon covers
    pub duration: f32,
    pub opacity: f32,
    /// Exponent shaping the alpha falloff toward the tail
    pub falloff_pow: f32,
    /// Seconds between recorded samples
    pub sample_period: f32,
    pub sample_accum: f32,
    /// Ring slot holding the newest sample
    pub head: u8,
    /// Number of valid samples
    pub count: u8,
}

impl Default for TrailState {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 0.02,
            duration: 0.35,
            opacity: 0.15,
            falloff_pow: 2.0,
            sample_period: trail_constants::DEFAULT_SAMPLE_PERIOD,
            sample_accum: 0.0,
            head: 0,
            count: 0,
        }
    }
}

impl TrailState {
    /// Forget recorded history, keeping the settings
    pub fn reset_history(&mut self) {
        self.head = 0;
        self.count = 0;
        self.sample_accum = 0.0;
    }

    /// Whether this trail records samples at all
    pub fn is_sampling(&self) -> bool {
        self.enabled && self.duration > 0.0 && self.sample_period > 0.0
    }
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            color: Vec4::ONE,
            base_color: Vec4::ONE,
            lifetime: 1.0,
            original_lifetime: 1.0,
            size: 8.0,
            active: false,
            shape_id: 0,
            should_fade: true,
            fade_start_ratio: 0.7,
            damping: 0.0,
            gravity_scale: 0.35,
            updraft: 0.5,
            in_branch_phase: false,
            branch_phase_time: 0.0,
            trail: TrailState::default(),
            smoke_amount: 0.0,
            recursion_depth_remaining: 0,
            recursion_prob: 0.0,
        }
    }
}

impl Particle {
    /// Remaining life as a fraction of the spawn lifetime
    pub fn life_ratio(&self) -> f32 {
        if self.original_lifetime > 0.0 {
            (self.lifetime / self.original_lifetime).max(0.0)
        } else {
            0.0
        }
    }

    /// Recompute alpha from the fade policy
    pub fn apply_fade(&mut self) {
        let life_ratio = self.life_ratio();

        if self.should_fade {
            if life_ratio < self.fade_start_ratio && self.fade_start_ratio > 0.0 {
                let fade_progress = life_ratio / self.fade_start_ratio;
                self.color = self.base_color;
                self.color.w = fade_progress;
            }
        } else {
            self.color.w = life_ratio.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_particle_is_inactive() {
        let p = Particle::default();
        assert!(!p.active);
        assert_eq!(p.trail.count, 0);
        assert!(!p.trail.is_sampling());
    }

    #[test]
    fn test_fade_scales_alpha_after_start_ratio() {
        let mut p = Particle {
            base_color: Vec4::new(1.0, 0.5, 0.0, 1.0),
            original_lifetime: 2.0,
            lifetime: 0.5,
            fade_start_ratio: 0.5,
            ..Default::default()
        };
        p.apply_fade();

        // life ratio 0.25 over a 0.5 start ratio
        assert!((p.color.w - 0.5).abs() < 1e-6);
        assert_eq!(p.color.truncate(), p.base_color.truncate());
    }

    #[test]
    fn test_fade_untouched_before_start_ratio() {
        let mut p = Particle {
            color: Vec4::new(0.2, 0.2, 0.2, 0.9),
            original_lifetime: 2.0,
            lifetime: 1.8,
            fade_start_ratio: 0.5,
            ..Default::default()
        };
        p.apply_fade();
        assert!((p.color.w - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_no_fade_uses_sqrt_life() {
        let mut p = Particle {
            should_fade: false,
            original_lifetime: 4.0,
            lifetime: 1.0,
            ..Default::default()
        };
        p.apply_fade();
        assert!((p.color.w - 0.5).abs() < 1e-6);
    }
}
