//! Error types for parameter injection
//!
//! - [`ConfigError`]: a document could not be read or parsed
//! - [`ParamError`]: a keyword argument is missing or has the wrong shape

use std::path::PathBuf;

/// Errors while loading a configuration document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document does not exist
    #[error("config document not found: {path}")]
    NotFound { path: PathBuf },

    /// IO error during read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is malformed
    #[error("failed to parse {format} document {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Create IO error for path, mapping `NotFound` to its own variant
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Create parse error for path
    pub fn parse_error(
        path: impl Into<PathBuf>,
        format: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            path: path.into(),
            format,
            message: message.into(),
        }
    }

    /// Check if the document was missing
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the document was malformed
    #[inline]
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Errors while reading keyword arguments
#[derive(Debug, thiserror::Error)]
pub enum ParamError {
    /// No value under that name
    #[error("missing parameter: {0}")]
    Missing(String),

    /// Value does not deserialize into the requested type
    #[error("invalid parameter '{name}': {message}")]
    InvalidType { name: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_maps_not_found() {
        let err = ConfigError::io_error(
            "params.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("params.yaml"));

        let err = ConfigError::io_error(
            "params.yaml",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn parse_error_display() {
        let err = ConfigError::parse_error("a.json", "json", "expected value");
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "failed to parse json document a.json: expected value"
        );
    }
}
