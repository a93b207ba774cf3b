//! Color scheme evaluation
//!
//! Assigns a base color to every generated branch, then jitters saturation
//! and brightness in HSV space.

use glam::{Vec3, Vec4};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fireworks::GeneratedBranch;

/// How colors are distributed over branches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorDistribution {
    /// Every branch uses `uniform_color`
    #[default]
    Uniform,
    /// Linear blend from start to end by branch index
    Gradient,
    /// Blend by angle from world up
    Radial,
    /// Random palette entry per branch
    Random,
    /// Branch colors are assigned by the caller
    PerBranch,
    /// Cycle through the palette
    Alternating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub distribution: ColorDistribution,
    pub uniform_color: Vec4,
    /// Gradient and radial endpoints
    pub gradient_start: Vec4,
    pub gradient_end: Vec4,
    /// Random and alternating source colors
    pub palette: Vec<Vec4>,
    /// Per-branch saturation jitter (0-1)
    pub saturation_variance: f32,
    /// Per-branch brightness jitter (0-1)
    pub brightness_variance: f32,
    pub fade_over_time: bool,
    /// Life ratio (0-1) at which particles start fading
    pub fade_start_ratio: f32,
}

const RED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);
const WHITE: Vec4 = Vec4::ONE;
const BLUE: Vec4 = Vec4::new(0.0, 0.0, 1.0, 1.0);

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            distribution: ColorDistribution::Uniform,
            uniform_color: WHITE,
            gradient_start: RED,
            gradient_end: BLUE,
            palette: vec![RED, WHITE, BLUE],
            saturation_variance: 0.0,
            brightness_variance: 0.0,
            fade_over_time: true,
            fade_start_ratio: 0.7,
        }
    }
}

impl ColorScheme {
    pub fn uniform(color: Vec4) -> Self {
        Self {
            distribution: ColorDistribution::Uniform,
            uniform_color: color,
            ..Default::default()
        }
    }

    pub fn red_white_blue() -> Self {
        Self {
            distribution: ColorDistribution::Alternating,
            palette: vec![RED, WHITE, BLUE],
            ..Default::default()
        }
    }

    pub fn rainbow() -> Self {
        Self {
            distribution: ColorDistribution::Gradient,
            gradient_start: RED,
            gradient_end: Vec4::new(0.5, 0.0, 1.0, 1.0),
            ..Default::default()
        }
    }

    pub fn golden_core() -> Self {
        Self {
            distribution: ColorDistribution::Radial,
            gradient_start: RED,
            gradient_end: Vec4::new(1.0, 0.843, 0.0, 1.0),
            ..Default::default()
        }
    }

    /// Base color for branch `index` of `total`, before variances
    pub fn base_color<R: Rng + ?Sized>(&self, index: usize, total: usize, direction: Vec3, rng: &mut R) -> Option<Vec4> {
        match self.distribution {
            ColorDistribution::Uniform => Some(self.uniform_color),
            ColorDistribution::Gradient => {
                let t = if total > 1 {
                    index as f32 / (total - 1) as f32
                } else {
                    0.0
                };
                Some(self.gradient_start.lerp(self.gradient_end, t))
            }
            ColorDistribution::Radial => {
                let cos_angle = direction.normalize_or_zero().dot(Vec3::Y).clamp(-1.0, 1.0);
                let t = cos_angle.acos() / std::f32::consts::PI;
                Some(self.gradient_start.lerp(self.gradient_end, t))
            }
            ColorDistribution::Random => self.palette.choose(rng).copied(),
            ColorDistribution::Alternating => {
                if self.palette.is_empty() {
                    None
                } else {
                    Some(self.palette[index % self.palette.len()])
                }
            }
            ColorDistribution::PerBranch => None,
        }
    }
}

/// Color every branch and copy the scheme's fade settings onto it.
///
/// Per-branch schemes keep the caller-assigned color; an empty palette
/// leaves branches white.
pub fn apply_colors(scheme: &ColorScheme, branches: &mut [GeneratedBranch]) {
    let total = branches.len();
    let mut rng = rand::thread_rng();

    for (index, branch) in branches.iter_mut().enumerate() {
        let base = match scheme.distribution {
            ColorDistribution::PerBranch => branch.color,
            _ => scheme
                .base_color(index, total, branch.direction, &mut rng)
                .unwrap_or(Vec4::ONE),
        };

        branch.color = apply_variances(
            base,
            scheme.saturation_variance,
            scheme.brightness_variance,
            &mut rng,
        );
        branch.params.should_fade = scheme.fade_over_time;
        branch.params.fade_start_ratio = scheme.fade_start_ratio;
    }
}

/// Jitter saturation and value by up to the given variances, keeping alpha
pub fn apply_variances<R: Rng + ?Sized>(
    color: Vec4,
    saturation_variance: f32,
    brightness_variance: f32,
    rng: &mut R,
) -> Vec4 {
    if saturation_variance <= 0.0 && brightness_variance <= 0.0 {
        return color;
    }

    let mut hsv = rgb_to_hsv(color.truncate());

    if saturation_variance > 0.0 {
        hsv.y = (hsv.y + rng.gen_range(-saturation_variance..=saturation_variance)).clamp(0.0, 1.0);
    }
    if brightness_variance > 0.0 {
        hsv.z = (hsv.z + rng.gen_range(-brightness_variance..=brightness_variance)).clamp(0.0, 1.0);
    }

    hsv_to_rgb(hsv).extend(color.w)
}

/// RGB to HSV with hue in degrees [0, 360)
pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let max = rgb.max_element();
    let min = rgb.min_element();
    let delta = max - min;

    let mut hue = if delta < 1e-5 {
        0.0
    } else if max == rgb.x {
        60.0 * ((rgb.y - rgb.z) / delta).rem_euclid(6.0)
    } else if max == rgb.y {
        60.0 * ((rgb.z - rgb.x) / delta + 2.0)
    } else {
        60.0 * ((rgb.x - rgb.y) / delta + 4.0)
    };
    if hue < 0.0 {
        hue += 360.0;
    }

    let saturation = if max < 1e-5 { 0.0 } else { delta / max };

    Vec3::new(hue, saturation, max)
}

pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let (h, s, v) = (hsv.x, hsv.y, hsv.z);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h {
        h if (0.0..60.0).contains(&h) => (c, x, 0.0),
        h if (60.0..120.0).contains(&h) => (x, c, 0.0),
        h if (120.0..180.0).contains(&h) => (0.0, c, x),
        h if (180.0..240.0).contains(&h) => (0.0, x, c),
        h if (240.0..300.0).contains(&h) => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Vec3::new(r + m, g + m, b + m)
}
