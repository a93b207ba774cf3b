pub mod particle;
pub mod physics;
pub mod pool;
pub mod render_data;
pub mod secondary;
pub mod trail;

pub use particle::{Particle, TrailState};
pub use pool::{ParticlePool, PoolUpdate};
pub use render_data::{prepare_render_data, prepare_trail_ribbons, ParticleGpuData, TrailSample};
