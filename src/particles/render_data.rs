//! Render-facing extraction from the arena
//!
//! Draw submission lives outside this crate; these helpers flatten active
//! particles and trail ribbons into plain records a renderer can upload.

use glam::{Vec3, Vec4};

use crate::constants::trail_constants::{BASE_OPACITY, PIXEL_TO_WORLD};
use crate::particles::ParticlePool;

/// Render data for GPU
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleGpuData {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub shape_id: u32,
    pub _padding: [f32; 3],
}

/// One ribbon vertex pair center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vec3,
    /// Full ribbon width in world units
    pub width: f32,
    pub color: Vec4,
}

/// Convert active particles to GPU format
pub fn prepare_render_data(pool: &ParticlePool, gpu_buffer: &mut Vec<ParticleGpuData>) {
    gpu_buffer.clear();
    gpu_buffer.reserve(pool.capacity());

    for particle in pool.all().iter().filter(|p| p.active) {
        gpu_buffer.push(ParticleGpuData {
            position: particle.position.to_array(),
            size: particle.size,
            color: particle.color.to_array(),
            shape_id: particle.shape_id as u32,
            _padding: [0.0; 3],
        });
    }
}

/// Build one ribbon per trailing particle, samples ordered oldest to newest.
///
/// Alpha and width taper toward the oldest sample.
pub fn prepare_trail_ribbons(pool: &ParticlePool, ribbons: &mut Vec<Vec<TrailSample>>) {
    ribbons.clear();

    for (index, particle) in pool.all().iter().enumerate() {
        let trail = &particle.trail;
        if !particle.active || !trail.enabled || trail.width <= 0.0 || trail.count < 2 {
            continue;
        }

        let points = pool.trail_points(index);
        if points.len() < 2 {
            continue;
        }

        let base_width = if trail.width <= 1.0 {
            particle.size * trail.width * PIXEL_TO_WORLD
        } else {
            trail.width
        };
        let falloff = trail.falloff_pow.max(1.0);
        let last = (points.len() - 1) as f32;

        let ribbon = points
            .iter()
            .enumerate()
            .map(|(k, &position)| {
                let u = k as f32 / last;
                let mut color = particle.color;
                color.w = BASE_OPACITY * trail.opacity * u.powf(falloff);
                TrailSample {
                    position,
                    width: base_width * (0.25 + 0.75 * u),
                    color,
                }
            })
            .collect();

        ribbons.push(ribbon);
    }
}
