//! Editor session
//!
//! Command/event surface between an editing front end and the engine.

pub mod commands;
pub mod session;

pub use commands::{sanitize_template, EditorCommand, EditorEvent, EditorMode, TemplateEdit};
pub use session::{EditorSession, StepStats};
