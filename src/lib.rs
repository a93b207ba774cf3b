pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod fireworks;
pub mod instance;
pub mod particles;
pub mod persistence;
pub mod scene;
pub mod shapes;

pub use config::{EngineConfig, PlaybackConfig, PreviewConfig};
pub use editor::{EditorCommand, EditorEvent, EditorMode, EditorSession, TemplateEdit};
pub use error::{EngineError, EngineResult};
pub use fireworks::{
    BranchDescriptor, BranchLayout, ColorDistribution, ColorScheme, EmissionZone,
    FireworkTemplate, GeneratedBranch, PhysicsProfile, TemplateId, TemplateLibrary, VisualMode,
};
pub use instance::{EmissionState, FireworkInstance, InstanceManager};
pub use particles::{
    prepare_render_data, prepare_trail_ribbons, Particle, ParticleGpuData, ParticlePool,
    PoolUpdate, TrailSample,
};
pub use persistence::{AssetMetadata, FireworkAsset};
pub use scene::{FireworkEvent, Scene, ScenePlayer, Timeline};
pub use shapes::{BuiltinShape, Shape, ShapeId, ShapeRegistry};
