//! Branch layout generation
//!
//! Directions come from a Fibonacci sphere lattice squeezed into an
//! elevation band and, when the zone is not a full circle, an azimuth band.
//! Spacing stays near-uniform inside the wedge even for small branch counts.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Golden ratio
const PHI: f32 = 1.618_034;

/// Grid size and angular constraints for branch directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchLayout {
    pub grid_x: i32,
    pub grid_y: i32,
    /// Azimuth band in degrees, copied from the template zone
    pub azimuth_min: f32,
    pub azimuth_max: f32,
    /// Elevation band in degrees, copied from the template zone
    pub elevation_min: f32,
    pub elevation_max: f32,
    /// Direction jitter (0-1)
    pub randomness: f32,
}

impl Default for BranchLayout {
    fn default() -> Self {
        Self {
            grid_x: 8,
            grid_y: 8,
            azimuth_min: -180.0,
            azimuth_max: 180.0,
            elevation_min: 0.0,
            elevation_max: 90.0,
            randomness: 0.0,
        }
    }
}

impl BranchLayout {
    /// `grid_x * grid_y`, zero when either side is non-positive
    pub fn branch_count(&self) -> usize {
        if self.grid_x <= 0 || self.grid_y <= 0 {
            0
        } else {
            self.grid_x as usize * self.grid_y as usize
        }
    }
}

/// Generate `grid_x * grid_y` unit directions inside the layout's zone
pub fn generate_directions(layout: &BranchLayout) -> Vec<Vec3> {
    let n = layout.branch_count();
    if n == 0 {
        return Vec::new();
    }

    let y_min = layout.elevation_min.to_radians().sin();
    let y_max = layout.elevation_max.to_radians().sin();
    let az_min = layout.azimuth_min.to_radians();
    let az_span = layout.azimuth_max.to_radians() - az_min;

    let mut rng = rand::thread_rng();
    let mut directions = Vec::with_capacity(n);

    for i in 0..n {
        let t = if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };
        let y = y_min + t * (y_max - y_min);
        let radius = (1.0 - y * y).max(0.0).sqrt();

        let mut theta = (2.0 * PI * i as f32 / PHI).rem_euclid(TAU);
        if az_span < TAU {
            theta = az_min + (theta / TAU) * az_span;
        }

        let mut dir = Vec3::new(theta.cos() * radius, y, theta.sin() * radius).normalize_or_zero();

        if layout.randomness > 0.0 {
            let amount = layout.randomness * 0.1;
            let perturbation = Vec3::new(
                rng.gen_range(-1.0f32..=1.0) * amount,
                rng.gen_range(-1.0f32..=1.0) * amount,
                rng.gen_range(-1.0f32..=1.0) * amount,
            );
            dir = (dir + perturbation).normalize_or_zero();
        }

        directions.push(dir);
    }

    directions
}
