//! Engine-wide error type
//!
//! Only the outer surfaces (configuration, persistence, scene lookups) are
//! fallible. The simulation core signals exhaustion with `Option::None` and
//! never produces an `EngineError`.

use thiserror::Error;

use crate::fireworks::TemplateId;

/// Result type for fallible engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by configuration, persistence and scene dispatch
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unexpected file format: expected {expected}, found {found}")]
    UnexpectedFormat { expected: String, found: String },

    #[error("Unsupported {kind} version: supported up to {expected}, found {found}")]
    VersionMismatch {
        kind: String,
        expected: u32,
        found: u32,
    },

    #[error("Template not found: {0}")]
    TemplateNotFound(TemplateId),
}
