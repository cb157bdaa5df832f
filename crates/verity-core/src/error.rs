//! Error types for the engine

use verity_params::ConfigError;
use verity_report::PersistError;
use verity_result::UnknownLabelError;

/// Errors raised by engine setup and the external bridge
#[derive(Debug, thiserror::Error)]
pub enum VerityError {
    /// Configuration or details document failure
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Marker name with no matching label
    #[error(transparent)]
    UnknownLabel(#[from] UnknownLabelError),

    /// Report could not be written
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Unrecognized execution mode name
    #[error("invalid execution mode '{0}', expected 'interactive' or 'scripted'")]
    InvalidMode(String),
}

impl VerityError {
    /// Check if a label lookup failed
    #[inline]
    #[must_use]
    pub fn is_unknown_label(&self) -> bool {
        matches!(self, Self::UnknownLabel(_))
    }
}

/// Result alias
pub type Result<T> = std::result::Result<T, VerityError>;
