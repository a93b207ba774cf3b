pub mod color;
pub mod descriptor;
pub mod emission;
pub mod layout;
pub mod library;
pub mod physics_profile;
pub mod template;

pub use color::{apply_colors, ColorDistribution, ColorScheme};
pub use descriptor::{BranchDescriptor, GeneratedBranch, VisualMode};
pub use emission::{emit_branch, emit_particle};
pub use layout::{generate_directions, BranchLayout};
pub use library::{TemplateId, TemplateLibrary};
pub use physics_profile::PhysicsProfile;
pub use template::{EmissionZone, FireworkTemplate};
