//! Model details section of the model card

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use verity_params::ConfigError;

/// Title used when no details document was loaded
pub const DEFAULT_TITLE: &str = "Model Card";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// Free-form description of the model under test
///
/// Known fields are typed; anything else in the source document is kept
/// in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    /// Human title, also used to name the report directory
    #[serde(default = "default_title")]
    pub title: String,
    /// Summary of the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Model version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Responsible people or teams
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub owners: Vec<String>,
    /// Any other fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ModelDetails {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
            version: None,
            owners: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl ModelDetails {
    /// Create details with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Load from a JSON or YAML document
    ///
    /// # Errors
    /// `ConfigError` if the document is missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        verity_params::load_as(path)
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Title as a directory-name component
    ///
    /// Spaces become underscores; path separators are replaced too so the
    /// report stays in a single directory.
    #[must_use]
    pub fn slug(&self) -> String {
        self.title.replace([' ', '/', '\\'], "_")
    }
}
