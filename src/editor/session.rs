use glam::Vec3;

use crate::config::EngineConfig;
use crate::editor::{sanitize_template, EditorCommand, EditorEvent, EditorMode, TemplateEdit};
use crate::fireworks::{TemplateId, TemplateLibrary};
use crate::instance::{FireworkInstance, InstanceManager};
use crate::particles::{ParticlePool, PoolUpdate};
use crate::scene::{Scene, ScenePlayer};
use crate::shapes::ShapeRegistry;

/// What one [`EditorSession::step`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Instances created by scene dispatch
    pub dispatched: usize,
    /// Particles emitted by instances
    pub emitted: usize,
    pub pool: PoolUpdate,
    /// The paused scene preview was rebuilt this step
    pub preview_rebuilt: bool,
}

/// Everything an editing front end drives: template library, scene,
/// playback and the live simulation
#[derive(Debug)]
pub struct EditorSession {
    pub library: TemplateLibrary,
    pub shapes: ShapeRegistry,
    pub scene: Scene,
    pub player: ScenePlayer,
    pub manager: InstanceManager,
    pub pool: ParticlePool,
    pub config: EngineConfig,
    mode: EditorMode,
    selected_event: Option<usize>,
    /// Simulation clock as of the last step
    now: f32,
}

impl EditorSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            library: TemplateLibrary::new(),
            shapes: ShapeRegistry::new(),
            scene: Scene::default(),
            player: ScenePlayer::new(),
            manager: InstanceManager::new(),
            pool: ParticlePool::new(config.pool_capacity),
            config,
            mode: EditorMode::Template,
            selected_event: None,
            now: 0.0,
        }
    }

    /// Session with the built-in presets loaded
    pub fn with_presets(config: EngineConfig) -> Self {
        let mut session = Self::new(config);
        session.library.seed_presets();
        session
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn selected_event(&self) -> Option<usize> {
        self.selected_event
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    /// Scene mode while paused shows a frozen preview instead of simulating
    pub fn in_scene_preview(&self) -> bool {
        self.mode == EditorMode::Scene && !self.player.timeline.is_playing()
    }

    pub fn handle(&mut self, command: EditorCommand) -> Vec<EditorEvent> {
        let mut events = Vec::new();

        match command {
            EditorCommand::TestExplosion { position } => self.test_explosion(position, &mut events),
            EditorCommand::EditTemplate(edit) => self.edit_template(edit, &mut events),
            EditorCommand::SelectTemplate(id) => {
                self.library.set_active_id(id);
                self.player.invalidate_preview();
            }
            EditorCommand::CloneTemplate(source) => match self.library.clone_template(source) {
                Some(id) => {
                    self.library.set_active_id(id);
                    events.push(self.regenerated(id));
                }
                None => log::warn!("Cannot clone unknown template {}", source),
            },
            EditorCommand::SetMode(mode) => {
                if mode != self.mode {
                    log::info!("Editor mode {:?} -> {:?}", self.mode, mode);
                    self.mode = mode;
                    self.player.invalidate_preview();
                    events.push(EditorEvent::ModeChanged(mode));
                }
            }
            EditorCommand::Play => {
                if !self.player.timeline.is_playing() {
                    // Replay from the start once the end has been reached
                    if self.player.timeline.time() >= self.scene.duration() {
                        self.player.timeline.seek(0.0);
                    }
                    self.player.timeline.set_playing(true);
                    events.push(EditorEvent::PlaybackStarted);
                }
            }
            EditorCommand::Pause => {
                if self.player.timeline.is_playing() {
                    self.player.timeline.set_playing(false);
                    self.player.invalidate_preview();
                    events.push(EditorEvent::PlaybackStopped);
                }
            }
            EditorCommand::Seek(time) => {
                self.player.timeline.seek(time.min(self.scene.duration()));
                self.player.invalidate_preview();
            }
            EditorCommand::SelectEvent(index) => {
                self.selected_event = index.filter(|&i| i < self.scene.events().len());
            }
            EditorCommand::ClearSimulation => {
                self.manager.clear();
                self.pool.clear_all();
                self.player.invalidate_preview();
                events.push(EditorEvent::SimulationCleared);
            }
        }

        events
    }

    /// Advance the session to `now`.
    ///
    /// Runs scene dispatch in scene mode, rebuilds the paused preview when its
    /// selection changed, then steps instances and the arena unless the
    /// preview is frozen.
    pub fn step(&mut self, now: f32, dt: f32) -> StepStats {
        self.now = now;
        let mut stats = StepStats::default();

        if self.mode == EditorMode::Scene {
            stats.dispatched = self.player.update(
                &self.scene,
                &self.library,
                &mut self.manager,
                &mut self.pool,
                now,
                dt,
            );
        }

        if self.in_scene_preview() {
            if self.player.preview_stale(&self.scene, self.selected_event) {
                self.player.rebuild_peak_preview(
                    &self.scene,
                    &self.library,
                    self.selected_event,
                    &mut self.manager,
                    &mut self.pool,
                    now,
                    &self.config.preview,
                );
                stats.preview_rebuilt = true;
            }
            return stats;
        }

        stats.emitted = self.manager.update(now, dt, &mut self.pool);
        stats.pool = self.pool.update(dt);
        stats
    }

    fn test_explosion(&mut self, position: Vec3, events: &mut Vec<EditorEvent>) {
        let Some(template_id) = self.library.active_id() else {
            log::warn!("Test explosion ignored: no active template");
            return;
        };
        let Some(template) = self.library.snapshot(template_id) else {
            return;
        };

        log::info!("Test explosion of '{}' at {:?}", template.name, position);
        self.manager
            .add(FireworkInstance::new(template, position, self.now));
        events.push(EditorEvent::InstanceSpawned {
            template_id,
            position,
        });
    }

    fn edit_template(&mut self, edit: TemplateEdit, events: &mut Vec<EditorEvent>) {
        let Some(id) = self.library.active_id() else {
            log::warn!("Template edit ignored: no active template");
            return;
        };
        let Some(template) = self.library.get_mut(id) else {
            return;
        };

        let clamped = edit.apply(template, &self.shapes);
        for field in &clamped {
            log::warn!("Clamped out-of-range value for '{}' on {}", field, id);
        }
        template.regenerate_branches();

        events.extend(
            clamped
                .into_iter()
                .map(|field| EditorEvent::InputClamped { field }),
        );
        events.push(self.regenerated(id));
        self.player.invalidate_preview();
    }

    fn regenerated(&self, id: TemplateId) -> EditorEvent {
        EditorEvent::TemplateRegenerated {
            id,
            branch_count: self.library.get(id).map_or(0, |t| t.branch_count()),
        }
    }

    /// Bring every library template back into range and regenerate it
    pub fn sanitize_library(&mut self) -> usize {
        let ids: Vec<TemplateId> = self.library.ids().collect();
        let mut corrected = 0;
        for id in ids {
            if let Some(template) = self.library.get_mut(id) {
                corrected += sanitize_template(template, &self.shapes).len();
                template.regenerate_branches();
            }
        }
        corrected
    }
}
