use std::sync::Arc;

use glam::Vec3;

use crate::constants::emission_constants::MIN_EMIT_INTERVAL;
use crate::fireworks::{emit_branch, emit_particle, FireworkTemplate, GeneratedBranch};
use crate::particles::ParticlePool;

/// Lifecycle of one explosion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionState {
    /// Waiting for the trigger time
    Idle,
    /// Emitters are spawning particles
    Emitting,
    /// Every emitter has spawned its whole branch
    Finished,
}

/// Spawn schedule for one generated branch
#[derive(Debug, Clone, PartialEq)]
struct BranchEmitter {
    /// Index into the template's generated branches
    branch: usize,
    total: usize,
    emitted: usize,
    /// Seconds between spawns; 0 for a burst
    interval: f32,
    accum: f32,
    done: bool,
}

impl BranchEmitter {
    fn new(branch: usize, source: &GeneratedBranch) -> Self {
        let duration = source.params.emission_duration;
        let count = source.params.particles_per_branch;

        let interval = if duration > 0.0 && count > 0 {
            (duration / count as f32).max(MIN_EMIT_INTERVAL)
        } else {
            0.0
        };

        Self {
            branch,
            total: count.max(0) as usize,
            emitted: 0,
            interval,
            accum: 0.0,
            done: false,
        }
    }

    fn is_burst(&self) -> bool {
        self.interval <= 0.0
    }

    /// Advance by `dt`, returning particles spawned
    fn update(&mut self, template: &FireworkTemplate, position: Vec3, pool: &mut ParticlePool, dt: f32) -> usize {
        let Some(branch) = template.generated_branches().get(self.branch) else {
            self.done = true;
            return 0;
        };

        if self.is_burst() {
            let mut spawned = 0;
            if self.emitted == 0 {
                spawned = emit_branch(branch, &template.physics, position, pool).len();
                self.emitted = self.total;
            }
            self.done = true;
            return spawned;
        }

        // Tolerate float drift so a whole number of intervals is never short by one
        let threshold = self.interval * (1.0 - 1e-3);

        let mut spawned = 0;
        self.accum += dt;
        while self.emitted < self.total && self.accum >= threshold {
            self.accum -= self.interval;
            if emit_particle(branch, &template.physics, position, pool, self.emitted, self.total).is_none() {
                log::trace!("Particle pool full, emitter for branch {} waits", self.branch);
                break;
            }
            self.emitted += 1;
            spawned += 1;
        }

        self.done = self.emitted >= self.total;
        spawned
    }
}

/// One explosion occurrence of a template at a position and time
#[derive(Debug, Clone)]
pub struct FireworkInstance {
    template: Option<Arc<FireworkTemplate>>,
    pub position: Vec3,
    /// Timeline time (seconds) at which emission starts
    pub trigger_time: f32,
    emitters: Vec<BranchEmitter>,
    state: EmissionState,
}

impl FireworkInstance {
    pub fn new(template: Arc<FireworkTemplate>, position: Vec3, trigger_time: f32) -> Self {
        Self {
            template: Some(template),
            position,
            trigger_time,
            emitters: Vec::new(),
            state: EmissionState::Idle,
        }
    }

    /// Instance without a template; every update is a no-op
    pub fn detached(position: Vec3, trigger_time: f32) -> Self {
        Self {
            template: None,
            position,
            trigger_time,
            emitters: Vec::new(),
            state: EmissionState::Idle,
        }
    }

    pub fn template(&self) -> Option<&FireworkTemplate> {
        self.template.as_deref()
    }

    pub fn state(&self) -> EmissionState {
        self.state
    }

    pub fn is_triggered(&self) -> bool {
        self.state != EmissionState::Idle
    }

    pub fn is_finished(&self) -> bool {
        self.state == EmissionState::Finished
    }

    /// Step the emitters. Returns the number of particles spawned.
    ///
    /// A finished instance, or one without a template, does nothing.
    pub fn update(&mut self, current_time: f32, dt: f32, pool: &mut ParticlePool) -> usize {
        if self.state == EmissionState::Finished {
            return 0;
        }
        let Some(template) = self.template.as_deref() else {
            return 0;
        };
        let dt = dt.max(0.0);

        if self.state == EmissionState::Idle {
            if current_time < self.trigger_time {
                return 0;
            }

            log::debug!(
                "Triggering '{}' with {} branches at t={:.3}",
                template.name,
                template.branch_count(),
                current_time
            );
            self.emitters = template
                .generated_branches()
                .iter()
                .enumerate()
                .map(|(index, branch)| BranchEmitter::new(index, branch))
                .collect();
            self.state = EmissionState::Emitting;
        }

        let mut spawned = 0;
        let mut all_done = true;
        for emitter in self.emitters.iter_mut().filter(|e| !e.done) {
            spawned += emitter.update(template, self.position, pool, dt);
            all_done &= emitter.done;
        }

        if all_done {
            self.state = EmissionState::Finished;
            log::debug!(
                "Emission of '{}' finished, {} particles active",
                template.name,
                pool.active_count()
            );
        }

        spawned
    }
}
