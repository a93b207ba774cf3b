use glam::Vec3;

use crate::constants::pool_constants::TRAIL_SAMPLES;
use crate::particles::{physics, secondary, trail, Particle};

/// Per-step statistics returned by [`ParticlePool::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolUpdate {
    /// Active particles after the step
    pub active_particles: usize,
    /// Particles whose lifetime expired this step
    pub expired: usize,
    /// Smoke and sparkle particles spawned by deaths this step
    pub secondary_spawned: usize,
}

/// Fixed-capacity particle arena.
///
/// Slots are addressed by index and reused in place; nothing is allocated
/// after construction. A flat side buffer stores `TRAIL_SAMPLES` trail
/// positions per slot.
pub struct ParticlePool {
    /// Slot storage, `capacity` entries
    particles: Vec<Particle>,
    /// Trail history, `capacity * TRAIL_SAMPLES` entries
    trail_positions: Vec<Vec3>,
    /// Cursor for the circular free-slot search
    last_search_index: usize,
}

impl std::fmt::Debug for ParticlePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParticlePool")
            .field("capacity", &self.capacity())
            .field("active", &self.active_count())
            .field("last_search_index", &self.last_search_index)
            .finish()
    }
}

impl ParticlePool {
    /// Create an arena with every slot inactive
    pub fn new(capacity: usize) -> Self {
        log::debug!("Creating particle pool with {} slots", capacity);

        Self {
            particles: vec![Particle::default(); capacity],
            trail_positions: vec![Vec3::ZERO; capacity * TRAIL_SAMPLES],
            last_search_index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Claim an inactive slot, searching from the last successful index and
    /// wrapping once. The slot is marked active with empty trail history.
    ///
    /// `None` means the arena is full; callers stop spawning for this frame.
    pub fn allocate(&mut self) -> Option<usize> {
        let capacity = self.particles.len();
        let start = self.last_search_index.min(capacity);

        let index = (start..capacity)
            .chain(0..start)
            .find(|&i| !self.particles[i].active)?;

        self.last_search_index = index;
        let particle = &mut self.particles[index];
        particle.active = true;
        particle.trail.reset_history();
        Some(index)
    }

    /// Allocate a slot and fill it with `particle` (forced active, trail history reset)
    pub fn spawn(&mut self, mut particle: Particle) -> Option<usize> {
        let index = self.allocate()?;
        particle.active = true;
        particle.trail.reset_history();
        self.particles[index] = particle;
        Some(index)
    }

    /// Release a slot. Out-of-range indices are ignored.
    pub fn free(&mut self, index: usize) {
        if let Some(particle) = self.particles.get_mut(index) {
            particle.active = false;
            // Ring contents stay; count gates every reader
            particle.trail.reset_history();
        }
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Particle> {
        self.particles.get_mut(index)
    }

    /// Every slot, including inactive ones
    pub fn all(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.active).count()
    }

    /// Raw ring buffer of one slot (`TRAIL_SAMPLES` entries)
    pub fn trail_buffer(&self, index: usize) -> Option<&[Vec3]> {
        let start = index.checked_mul(TRAIL_SAMPLES)?;
        self.trail_positions.get(start..start + TRAIL_SAMPLES)
    }

    /// Valid trail samples of one slot, oldest first
    pub fn trail_points(&self, index: usize) -> Vec<Vec3> {
        match (self.particles.get(index), self.trail_buffer(index)) {
            (Some(particle), Some(ring)) => {
                trail::ordered(ring, particle.trail.head, particle.trail.count).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Step every active particle by `dt` seconds (negative `dt` is treated as 0).
    ///
    /// Slots are processed in index order. A particle whose lifetime runs out
    /// spawns its secondaries, is deactivated and skips integration.
    pub fn update(&mut self, dt: f32) -> PoolUpdate {
        let dt = dt.max(0.0);
        let mut rng = rand::thread_rng();
        let mut stats = PoolUpdate::default();

        for i in 0..self.particles.len() {
            if !self.particles[i].active {
                continue;
            }

            self.particles[i].lifetime -= dt;

            // Handle death
            if self.particles[i].lifetime <= 0.0 {
                // Parent stays active while spawning so its slot is not reused
                let parent = self.particles[i].clone();
                stats.secondary_spawned += secondary::spawn_on_death(self, &parent, &mut rng);

                let particle = &mut self.particles[i];
                particle.active = false;
                particle.trail.count = 0;
                stats.expired += 1;
                continue;
            }

            let particle = &mut self.particles[i];

            // Apply forces
            physics::integrate(particle, dt);

            // Record trail
            let ring = &mut self.trail_positions[i * TRAIL_SAMPLES..(i + 1) * TRAIL_SAMPLES];
            trail::sample(&mut particle.trail, ring, particle.position, dt);

            // Apply fade
            particle.apply_fade();
        }

        stats.active_particles = self.active_count();
        stats
    }

    /// Deactivate every slot and wipe trail history. Capacity is kept.
    pub fn clear_all(&mut self) {
        for particle in &mut self.particles {
            particle.active = false;
            particle.trail.reset_history();
        }
        self.trail_positions.fill(Vec3::ZERO);
        self.last_search_index = 0;

        log::debug!("Cleared particle pool ({} slots)", self.particles.len());
    }
}
