use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::fireworks::TemplateId;

/// One firework trigger on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireworkEvent {
    pub template_id: TemplateId,
    pub position: Vec3,
    /// Seconds on the timeline
    pub trigger_time: f32,
    pub enabled: bool,
    pub label: String,
}

impl FireworkEvent {
    pub fn new(template_id: TemplateId, position: Vec3, trigger_time: f32) -> Self {
        Self {
            template_id,
            position,
            trigger_time,
            enabled: true,
            label: String::new(),
        }
    }
}

/// Timed arrangement of firework events, independent from template authoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    /// Playback length in seconds (UI guidance, never negative)
    duration: f32,
    events: Vec<FireworkEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("Untitled Scene")
    }
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: 10.0,
            events: Vec::new(),
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn set_duration(&mut self, seconds: f32) {
        self.duration = seconds.max(0.0);
    }

    /// Events ordered by trigger time
    pub fn events(&self) -> &[FireworkEvent] {
        &self.events
    }

    pub fn event_mut(&mut self, index: usize) -> Option<&mut FireworkEvent> {
        self.events.get_mut(index)
    }

    /// Insert an event keeping time order; equal times keep insertion order.
    /// Returns the event's index.
    pub fn add_event(&mut self, event: FireworkEvent) -> usize {
        let index = self
            .events
            .partition_point(|e| e.trigger_time <= event.trigger_time);
        self.events.insert(index, event);
        index
    }

    /// Remove an event; out-of-range indices are ignored
    pub fn remove_event(&mut self, index: usize) -> Option<FireworkEvent> {
        if index < self.events.len() {
            Some(self.events.remove(index))
        } else {
            None
        }
    }

    /// Stable sort by trigger time (needed after editing times in place)
    pub fn sort_by_time(&mut self) {
        self.events
            .sort_by(|a, b| a.trigger_time.total_cmp(&b.trigger_time));
    }
}
