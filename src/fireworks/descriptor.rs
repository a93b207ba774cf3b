use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::shapes::ShapeId;

/// Visual family of a branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisualMode {
    /// A readable head with a strong trail
    #[default]
    Comet,
    /// Many jittery sparks with a wider spread
    Sparkle,
}

/// Canonical per-branch parameters, copied into every generated branch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchDescriptor {
    // Kinematics
    /// Initial speed (m/s)
    pub initial_speed: f32,
    /// Relative per-particle speed variance (0-1)
    pub speed_variance: f32,
    /// Linear drag (1/s)
    pub damping: f32,
    /// Relative per-particle damping variance (0-1)
    pub damping_variance: f32,

    // Environment
    pub gravity_scale: f32,
    /// Extra vertical acceleration (m/s²)
    pub updraft: f32,

    /// Cone angle around the branch direction (degrees)
    pub angular_spread: f32,

    pub particles_per_branch: i32,
    /// 0 emits the branch in one burst; > 0 spreads it over this many seconds
    pub emission_duration: f32,

    // Look
    /// Base render size (pixels)
    pub particle_size: f32,
    pub size_variance: f32,
    /// Particle lifetime (seconds)
    pub lifetime: f32,
    pub shape_id: ShapeId,
    pub visual_mode: VisualMode,

    // Trail ribbon
    pub trail_enabled: bool,
    pub trail_width: f32,
    pub trail_duration: f32,
    pub trail_opacity: f32,
    pub trail_falloff_pow: f32,

    // Head/tail speed shaping
    /// Share of the spawn order treated as the fast head (0-1)
    pub front_portion: f32,
    /// Bias exponent pushing head speeds toward the maximum (> 1)
    pub front_speed_bias: f32,
    /// Speed multiplier for the tail (0-1)
    pub back_speed_scale: f32,

    // Sparkle tuning
    pub sparkle_speed_jitter: f32,
    pub sparkle_spread_mult: f32,

    // Secondary effects
    pub smoke_amount: f32,
    pub recursion_depth: i32,
    pub recursion_prob: f32,

    // Fade, overwritten by the color scheme
    pub should_fade: bool,
    pub fade_start_ratio: f32,
}

impl Default for BranchDescriptor {
    fn default() -> Self {
        Self {
            initial_speed: 18.0,
            speed_variance: 0.10,
            damping: 10.0,
            damping_variance: 0.35,
            gravity_scale: 0.35,
            updraft: 0.5,
            angular_spread: 10.0,
            particles_per_branch: 40,
            emission_duration: 0.0,
            particle_size: 6.0,
            size_variance: 0.3,
            lifetime: 2.5,
            shape_id: 0,
            visual_mode: VisualMode::Comet,
            trail_enabled: false,
            trail_width: 0.02,
            trail_duration: 0.35,
            trail_opacity: 0.15,
            trail_falloff_pow: 2.0,
            front_portion: 0.85,
            front_speed_bias: 4.0,
            back_speed_scale: 0.55,
            sparkle_speed_jitter: 0.15,
            sparkle_spread_mult: 1.5,
            smoke_amount: 0.25,
            recursion_depth: 0,
            recursion_prob: 0.0,
            should_fade: false,
            fade_start_ratio: 0.5,
        }
    }
}

/// Fully resolved, ready-to-emit branch
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedBranch {
    /// Unit firing direction (after world rotation)
    pub direction: Vec3,
    /// Assigned color
    pub color: Vec4,
    /// Parameters copied from the template's descriptor
    pub params: BranchDescriptor,
}

impl Default for GeneratedBranch {
    fn default() -> Self {
        Self {
            direction: Vec3::Y,
            color: Vec4::ONE,
            params: BranchDescriptor::default(),
        }
    }
}

impl GeneratedBranch {
    pub fn with_direction(direction: Vec3) -> Self {
        Self {
            direction,
            ..Default::default()
        }
    }
}
