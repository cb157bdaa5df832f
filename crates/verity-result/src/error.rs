//! Error types for the result model

/// An external marker name does not match any built-in label
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test label: '{name}'")]
pub struct UnknownLabelError {
    name: String,
}

impl UnknownLabelError {
    /// Create error for marker name
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The marker name that failed to convert
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
