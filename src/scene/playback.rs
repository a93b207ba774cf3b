//! Scene playback dispatch and peak preview
//!
//! Playback turns timeline events into firework instances as the playhead
//! crosses them. While paused, the selected event is shown frozen near its
//! visual peak by fast-forwarding a fresh instance.

use glam::Vec3;

use crate::config::PreviewConfig;
use crate::fireworks::{FireworkTemplate, TemplateId, TemplateLibrary};
use crate::instance::{FireworkInstance, InstanceManager};
use crate::particles::ParticlePool;
use crate::scene::{Scene, Timeline};

/// Instances for every enabled event with `prev < trigger_time <= cur`.
///
/// Instances trigger at `now` on the simulation clock. Events referencing
/// unknown templates are skipped.
pub fn dispatch_events(
    scene: &Scene,
    library: &TemplateLibrary,
    prev: f32,
    cur: f32,
    now: f32,
) -> Vec<FireworkInstance> {
    scene
        .events()
        .iter()
        .filter(|e| e.enabled && e.trigger_time > prev && e.trigger_time <= cur)
        .filter_map(|e| match library.try_snapshot(e.template_id) {
            Ok(template) => {
                log::debug!(
                    "Dispatching '{}' at t={:.3} ({})",
                    template.name,
                    e.trigger_time,
                    e.template_id
                );
                Some(FireworkInstance::new(template, e.position, now))
            }
            Err(err) => {
                log::warn!("Skipping scene event at t={:.3}: {}", e.trigger_time, err);
                None
            }
        })
        .collect()
}

/// Time after trigger at which a template looks fullest: after emission,
/// around mid-life
pub fn peak_offset(template: &FireworkTemplate, config: &PreviewConfig) -> f32 {
    let emission = template.branch.emission_duration.max(0.0);
    let life = template.branch.lifetime.max(0.0);
    (emission + 0.5 * life).clamp(config.min_peak_offset, config.max_peak_offset)
}

/// Identity of what the peak preview currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewKey {
    selected: Option<usize>,
    template_id: Option<TemplateId>,
    enabled: bool,
    /// Position in millimetres so float jitter does not force rebuilds
    position_mm: [i32; 3],
}

impl PreviewKey {
    pub fn new(scene: &Scene, selected: Option<usize>) -> Self {
        match selected.and_then(|i| scene.events().get(i)) {
            Some(event) => Self {
                selected,
                template_id: Some(event.template_id),
                enabled: event.enabled,
                position_mm: quantize(event.position),
            },
            None => Self {
                selected: None,
                template_id: None,
                enabled: false,
                position_mm: [0; 3],
            },
        }
    }
}

fn quantize(position: Vec3) -> [i32; 3] {
    (position * 1000.0).round().as_ivec3().to_array()
}

/// Drives dispatch for one scene and owns the preview cache state
#[derive(Debug, Default)]
pub struct ScenePlayer {
    pub timeline: Timeline,
    was_playing: bool,
    preview_key: Option<PreviewKey>,
}

impl ScenePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance playback by `dt` and dispatch crossed events.
    ///
    /// Entering play clears the manager and the arena so playback starts from
    /// a clean slate. Returns the number of instances added.
    pub fn update(
        &mut self,
        scene: &Scene,
        library: &TemplateLibrary,
        manager: &mut InstanceManager,
        pool: &mut ParticlePool,
        now: f32,
        dt: f32,
    ) -> usize {
        let playing = self.timeline.is_playing();
        if playing && !self.was_playing {
            manager.clear();
            pool.clear_all();
            self.invalidate_preview();
        }
        self.was_playing = playing;

        if !playing {
            return 0;
        }

        let prev = self.timeline.last_dispatched();
        self.timeline.update(dt, scene.duration());
        let cur = self.timeline.time();

        let instances = dispatch_events(scene, library, prev, cur, now);
        let dispatched = instances.len();
        for instance in instances {
            manager.add(instance);
        }
        self.timeline.set_last_dispatched(cur);

        dispatched
    }

    /// Whether the paused preview shows something other than `selected`
    pub fn preview_stale(&self, scene: &Scene, selected: Option<usize>) -> bool {
        self.preview_key != Some(PreviewKey::new(scene, selected))
    }

    pub fn invalidate_preview(&mut self) {
        self.preview_key = None;
    }

    /// Clear everything and show the selected event near its peak.
    ///
    /// Returns `true` when an instance was created.
    #[allow(clippy::too_many_arguments)]
    pub fn rebuild_peak_preview(
        &mut self,
        scene: &Scene,
        library: &TemplateLibrary,
        selected: Option<usize>,
        manager: &mut InstanceManager,
        pool: &mut ParticlePool,
        now: f32,
        config: &PreviewConfig,
    ) -> bool {
        self.preview_key = Some(PreviewKey::new(scene, selected));

        manager.clear();
        pool.clear_all();

        let Some(event) = selected.and_then(|i| scene.events().get(i)) else {
            return false;
        };
        if !event.enabled {
            return false;
        }
        let Some(template) = library.snapshot(event.template_id) else {
            return false;
        };

        let offset = peak_offset(&template, config);
        let start = now - offset;
        manager.add(FireworkInstance::new(template, event.position, start));

        let steps = ((offset / config.step).ceil() as u32).min(config.max_steps);
        let mut t = start;
        for _ in 0..steps {
            let dt = config.step.min(now - t).max(0.0);
            manager.update(t + dt, dt, pool);
            pool.update(dt);
            t += dt;
            if dt <= 0.0 {
                break;
            }
        }

        log::debug!(
            "Rebuilt peak preview at +{:.2}s: {} particles",
            offset,
            pool.active_count()
        );
        true
    }
}
