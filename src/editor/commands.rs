//! Editor commands and notifications
//!
//! The editing front end talks to the engine only through these values:
//! it sends [`EditorCommand`]s and receives [`EditorEvent`]s back.

use glam::Vec3;

use crate::constants::layout_constants::MAX_GRID_SIDE;
use crate::fireworks::{
    BranchDescriptor, ColorScheme, EmissionZone, FireworkTemplate, PhysicsProfile, TemplateId,
    VisualMode,
};
use crate::shapes::{ShapeId, ShapeRegistry};

/// Which half of the editor is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Authoring a single template; test explosions simulate live
    #[default]
    Template,
    /// Arranging events on the timeline
    Scene,
}

/// One authoring change to the active template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateEdit {
    Rename(String),
    SetGrid { x: i32, y: i32 },
    SetParticlesPerBranch(i32),
    SetShape(ShapeId),
    SetVisualMode(VisualMode),
    SetZone(EmissionZone),
    /// Pitch, yaw, roll in degrees
    SetWorldRotation(Vec3),
    SetLayoutRandomness(f32),
    SetPhysics(PhysicsProfile),
    SetColorScheme(ColorScheme),
    /// Replace every branch parameter at once
    SetBranch(Box<BranchDescriptor>),
}

impl TemplateEdit {
    /// Apply to `template` and bring it back into range.
    ///
    /// Returns the names of fields that had to be clamped. The caller is
    /// responsible for regenerating branches.
    pub fn apply(self, template: &mut FireworkTemplate, shapes: &ShapeRegistry) -> Vec<&'static str> {
        match self {
            TemplateEdit::Rename(name) => template.name = name,
            TemplateEdit::SetGrid { x, y } => {
                template.layout.grid_x = x;
                template.layout.grid_y = y;
            }
            TemplateEdit::SetParticlesPerBranch(count) => template.branch.particles_per_branch = count,
            TemplateEdit::SetShape(id) => template.branch.shape_id = id,
            TemplateEdit::SetVisualMode(mode) => template.branch.visual_mode = mode,
            TemplateEdit::SetZone(zone) => template.zone = zone,
            TemplateEdit::SetWorldRotation(rotation) => template.world_rotation = rotation,
            TemplateEdit::SetLayoutRandomness(amount) => template.layout.randomness = amount,
            TemplateEdit::SetPhysics(physics) => template.physics = physics,
            TemplateEdit::SetColorScheme(scheme) => template.color_scheme = scheme,
            TemplateEdit::SetBranch(branch) => template.branch = *branch,
        }

        sanitize_template(template, shapes)
    }
}

fn at_least(value: &mut i32, min: i32, field: &'static str, clamped: &mut Vec<&'static str>) {
    between(value, min, i32::MAX, field, clamped);
}

fn between(value: &mut i32, min: i32, max: i32, field: &'static str, clamped: &mut Vec<&'static str>) {
    let fixed = (*value).clamp(min, max);
    if fixed != *value {
        *value = fixed;
        clamped.push(field);
    }
}

fn within(value: &mut f32, min: f32, max: f32, field: &'static str, clamped: &mut Vec<&'static str>) {
    let fixed = if value.is_nan() { min } else { value.clamp(min, max) };
    if fixed != *value {
        *value = fixed;
        clamped.push(field);
    }
}

/// Clamp authoring input to the ranges the simulation expects.
///
/// Returns the names of the fields that changed.
pub fn sanitize_template(template: &mut FireworkTemplate, shapes: &ShapeRegistry) -> Vec<&'static str> {
    let mut clamped = Vec::new();

    between(&mut template.layout.grid_x, 1, MAX_GRID_SIDE, "grid_x", &mut clamped);
    between(&mut template.layout.grid_y, 1, MAX_GRID_SIDE, "grid_y", &mut clamped);
    within(&mut template.layout.randomness, 0.0, 1.0, "randomness", &mut clamped);

    let branch = &mut template.branch;
    at_least(&mut branch.particles_per_branch, 1, "particles_per_branch", &mut clamped);
    at_least(&mut branch.recursion_depth, 0, "recursion_depth", &mut clamped);

    let shape = shapes.sanitize(branch.shape_id);
    if shape != branch.shape_id {
        branch.shape_id = shape;
        clamped.push("shape_id");
    }

    within(&mut branch.emission_duration, 0.0, f32::MAX, "emission_duration", &mut clamped);
    within(&mut branch.lifetime, 0.0, f32::MAX, "lifetime", &mut clamped);
    within(&mut branch.front_portion, 0.0, 1.0, "front_portion", &mut clamped);
    within(&mut branch.back_speed_scale, 0.0, 1.0, "back_speed_scale", &mut clamped);
    within(&mut branch.smoke_amount, 0.0, 1.0, "smoke_amount", &mut clamped);
    within(&mut branch.recursion_prob, 0.0, 1.0, "recursion_prob", &mut clamped);
    within(&mut branch.fade_start_ratio, 0.0, 1.0, "fade_start_ratio", &mut clamped);
    within(
        &mut template.color_scheme.fade_start_ratio,
        0.0,
        1.0,
        "color_fade_start_ratio",
        &mut clamped,
    );

    clamped
}

/// Request from the editing front end
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Fire the active template immediately at a position
    TestExplosion { position: Vec3 },
    EditTemplate(TemplateEdit),
    SelectTemplate(TemplateId),
    /// Duplicate a template and make the copy active
    CloneTemplate(TemplateId),
    SetMode(EditorMode),
    Play,
    Pause,
    /// Move the playhead (seconds); events before it will not dispatch
    Seek(f32),
    SelectEvent(Option<usize>),
    ClearSimulation,
}

/// Notification back to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    TemplateRegenerated { id: TemplateId, branch_count: usize },
    InstanceSpawned { template_id: TemplateId, position: Vec3 },
    ModeChanged(EditorMode),
    PlaybackStarted,
    PlaybackStopped,
    SimulationCleared,
    /// An edited value was out of range and has been corrected
    InputClamped { field: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_and_counts_clamped_to_one() {
        let shapes = ShapeRegistry::new();
        let mut template = FireworkTemplate::new("Edit");

        let clamped = TemplateEdit::SetGrid { x: 0, y: -3 }.apply(&mut template, &shapes);
        assert_eq!(clamped, vec!["grid_x", "grid_y"]);
        assert_eq!(template.layout.grid_x, 1);
        assert_eq!(template.layout.grid_y, 1);

        let clamped = TemplateEdit::SetParticlesPerBranch(0).apply(&mut template, &shapes);
        assert_eq!(clamped, vec!["particles_per_branch"]);
        assert_eq!(template.branch.particles_per_branch, 1);
    }

    #[test]
    fn test_oversized_grid_clamped() {
        let shapes = ShapeRegistry::new();
        let mut template = FireworkTemplate::new("Edit");

        let clamped = TemplateEdit::SetGrid { x: 100_000, y: 12 }.apply(&mut template, &shapes);
        assert_eq!(clamped, vec!["grid_x"]);
        assert_eq!(template.layout.grid_x, MAX_GRID_SIDE);
        assert_eq!(template.layout.grid_y, 12);

        template.regenerate_branches();
        assert_eq!(template.branch_count(), (MAX_GRID_SIDE * 12) as usize);
    }

    #[test]
    fn test_unknown_shape_falls_back() {
        let shapes = ShapeRegistry::new();
        let mut template = FireworkTemplate::new("Edit");

        let clamped = TemplateEdit::SetShape(99).apply(&mut template, &shapes);
        assert_eq!(clamped, vec!["shape_id"]);
        assert_eq!(template.branch.shape_id, 0);

        let clamped = TemplateEdit::SetShape(3).apply(&mut template, &shapes);
        assert!(clamped.is_empty());
        assert_eq!(template.branch.shape_id, 3);
    }

    #[test]
    fn test_ratios_clamped() {
        let shapes = ShapeRegistry::new();
        let mut template = FireworkTemplate::new("Edit");
        let branch = BranchDescriptor {
            smoke_amount: 2.0,
            recursion_prob: -0.5,
            fade_start_ratio: f32::NAN,
            ..BranchDescriptor::default()
        };

        let clamped = TemplateEdit::SetBranch(Box::new(branch)).apply(&mut template, &shapes);
        assert_eq!(clamped, vec!["smoke_amount", "recursion_prob", "fade_start_ratio"]);
        assert_eq!(template.branch.smoke_amount, 1.0);
        assert_eq!(template.branch.recursion_prob, 0.0);
        assert_eq!(template.branch.fade_start_ratio, 0.0);
    }

    #[test]
    fn test_in_range_edit_reports_nothing() {
        let shapes = ShapeRegistry::new();
        let mut template = FireworkTemplate::new("Edit");
        let clamped = TemplateEdit::SetWorldRotation(Vec3::new(10.0, 45.0, 0.0))
            .apply(&mut template, &shapes);
        assert!(clamped.is_empty());
        assert_eq!(template.world_rotation.y, 45.0);
    }
}
