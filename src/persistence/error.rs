//! Persistence-specific error helpers
//!
//! Constructors for the `EngineError` variants raised while reading asset
//! and scene documents, plus an I/O context helper.

use std::path::Path;

use crate::error::{EngineError, EngineResult};

/// Attach the file path to I/O failures
pub trait PersistenceErrorContext<T> {
    fn persistence_context(self, path: &Path, action: &str) -> EngineResult<T>;
}

impl<T> PersistenceErrorContext<T> for Result<T, std::io::Error> {
    fn persistence_context(self, path: &Path, action: &str) -> EngineResult<T> {
        self.map_err(|e| {
            EngineError::Io(std::io::Error::new(
                e.kind(),
                format!("{} failed for {}: {}", action, path.display(), e),
            ))
        })
    }
}

/// Document header names a different kind of file
pub fn unexpected_format(expected: &str, found: impl Into<String>) -> EngineError {
    EngineError::UnexpectedFormat {
        expected: expected.to_string(),
        found: found.into(),
    }
}

/// Document was written by an unknown (newer or invalid) format revision
pub fn version_mismatch(kind: &str, expected: u32, found: u32) -> EngineError {
    EngineError::VersionMismatch {
        kind: kind.to_string(),
        expected,
        found,
    }
}
