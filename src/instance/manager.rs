use crate::instance::FireworkInstance;
use crate::particles::ParticlePool;

/// Owns every live firework instance.
///
/// Finished instances stay until the owner calls [`clear`](Self::clear) or
/// [`remove_finished`](Self::remove_finished), so their state can still be
/// inspected.
#[derive(Debug, Default)]
pub struct InstanceManager {
    instances: Vec<FireworkInstance>,
}

impl InstanceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, instance: FireworkInstance) {
        self.instances.push(instance);
    }

    /// Step every instance in insertion order. Returns particles spawned.
    pub fn update(&mut self, current_time: f32, dt: f32, pool: &mut ParticlePool) -> usize {
        self.instances
            .iter_mut()
            .map(|instance| instance.update(current_time, dt, pool))
            .sum()
    }

    pub fn clear(&mut self) {
        if !self.instances.is_empty() {
            log::debug!("Clearing {} firework instances", self.instances.len());
        }
        self.instances.clear();
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[FireworkInstance] {
        &self.instances
    }

    pub fn finished_count(&self) -> usize {
        self.instances.iter().filter(|i| i.is_finished()).count()
    }

    /// Drop finished instances, returning how many were removed
    pub fn remove_finished(&mut self) -> usize {
        let before = self.instances.len();
        self.instances.retain(|instance| !instance.is_finished());
        before - self.instances.len()
    }
}
