pub mod playback;
pub mod scene;
pub mod timeline;

pub use playback::{dispatch_events, peak_offset, PreviewKey, ScenePlayer};
pub use scene::{FireworkEvent, Scene};
pub use timeline::Timeline;
