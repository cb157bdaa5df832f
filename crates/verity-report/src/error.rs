//! Error types for report persistence

use std::path::PathBuf;

/// Errors while writing or reading a persisted report
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// IO error on the report directory or one of its files
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A captured value has no representation in the report document
    #[error("report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if serialization (not IO) failed
    #[inline]
    #[must_use]
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization(_))
    }
}
