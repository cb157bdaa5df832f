//! Engine configuration

use crate::error::Result;
use crate::mode::{ExecutionMode, MODE_VAR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use verity_params::ConfigError;
use verity_report::DEFAULT_TITLE;

/// Variable overriding the report root
pub const REPORT_ROOT_VAR: &str = "VERITY_REPORT_ROOT";

/// Default directory reports are written under
pub const DEFAULT_REPORT_ROOT: &str = ".verity/reports";

/// What a scripted wrapper does when the check already returned a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestedCapture {
    /// Pass the inner result through without recording it again
    #[default]
    Skip,
    /// Add the outer labels and record it again under the outer key
    Merge,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerityConfig {
    /// Directory reports are written under
    pub report_root: PathBuf,
    /// Forced execution mode; detected when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<ExecutionMode>,
    /// Handling of checks that return a captured result
    pub nested_capture: NestedCapture,
    /// Title used until model details are captured
    pub default_title: String,
}

impl Default for VerityConfig {
    fn default() -> Self {
        Self {
            report_root: PathBuf::from(DEFAULT_REPORT_ROOT),
            mode: None,
            nested_capture: NestedCapture::Skip,
            default_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl VerityConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON or YAML document; missing keys take defaults
    ///
    /// # Errors
    /// `ConfigError` if the document is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let config: Self = verity_params::load_as(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// With report root
    #[inline]
    #[must_use]
    pub fn with_report_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.report_root = root.into();
        self
    }

    /// With forced mode
    #[inline]
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// With nested capture behavior
    #[inline]
    #[must_use]
    pub fn with_nested_capture(mut self, nested: NestedCapture) -> Self {
        self.nested_capture = nested;
        self
    }

    /// With default title
    #[inline]
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Apply `VERITY_MODE` and `VERITY_REPORT_ROOT`
    ///
    /// # Errors
    /// `VerityError::InvalidMode` if `VERITY_MODE` is not a mode name.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply `VERITY_MODE` and `VERITY_REPORT_ROOT`, skipping an invalid mode
    ///
    /// An unrecognized `VERITY_MODE` is logged and the mode is left to
    /// detection; the report root override still applies.
    #[must_use]
    pub fn with_env_overrides_lenient(self) -> Self {
        self.apply_overrides_lenient(|var| std::env::var(var).ok())
    }

    fn apply_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = self.apply_root_override(&lookup);
        if let Some(mode) = lookup(MODE_VAR) {
            config.mode = Some(mode.parse()?);
        }
        Ok(config)
    }

    fn apply_overrides_lenient(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = self.apply_root_override(&lookup);
        if let Some(mode) = lookup(MODE_VAR) {
            match mode.parse() {
                Ok(mode) => config.mode = Some(mode),
                Err(err) => tracing::warn!(%err, "ignoring {MODE_VAR}, using detected mode"),
            }
        }
        config
    }

    fn apply_root_override(mut self, lookup: &impl Fn(&str) -> Option<String>) -> Self {
        if let Some(root) = lookup(REPORT_ROOT_VAR).filter(|r| !r.is_empty()) {
            self.report_root = PathBuf::from(root);
        }
        self
    }

    /// Configured mode, or the detected one
    #[must_use]
    pub fn resolved_mode(&self) -> ExecutionMode {
        self.mode.unwrap_or_else(ExecutionMode::current)
    }
}
