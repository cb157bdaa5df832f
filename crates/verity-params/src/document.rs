//! Configuration documents
//!
//! Loads JSON or YAML files into `serde_json::Value` trees. The format is
//! chosen by file extension: `.yml`/`.yaml` parse as YAML, anything else
//! as JSON.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;

/// Document syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (default for unknown extensions)
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Select format from file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml" | "yaml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }

    /// Short format name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }

    /// Parse document text
    ///
    /// An empty YAML document is an empty mapping.
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed input.
    pub fn parse(&self, path: &Path, content: &str) -> Result<Value, ConfigError> {
        match self {
            DocumentFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::parse_error(path, self.name(), e.to_string())),
            DocumentFormat::Yaml => {
                if content.trim().is_empty() {
                    return Ok(Value::Object(Map::new()));
                }
                serde_yaml::from_str(content)
                    .map_err(|e| ConfigError::parse_error(path, self.name(), e.to_string()))
            }
        }
    }
}

/// Load a document from disk
///
/// # Errors
/// - `ConfigError::NotFound` if the file does not exist
/// - `ConfigError::Io` if the read fails
/// - `ConfigError::Parse` if the content is malformed
pub fn load_document(path: impl AsRef<Path>) -> Result<Value, ConfigError> {
    let path = path.as_ref();
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), format = format.name(), "loading document");
    format.parse(path, &content)
}

/// Load a document whose root must be a mapping
///
/// # Errors
/// As [`load_document`], plus `ConfigError::Parse` if the root is not a mapping.
pub fn load_mapping(path: impl AsRef<Path>) -> Result<Map<String, Value>, ConfigError> {
    let path = path.as_ref();
    match load_document(path)? {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::parse_error(
            path,
            DocumentFormat::from_path(path).name(),
            format!("expected a mapping at the document root, found {}", kind_of(&other)),
        )),
    }
}

/// Load a document and deserialize it into `T`
///
/// # Errors
/// As [`load_document`], plus `ConfigError::Parse` if the tree does not fit `T`.
pub fn load_as<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let value = load_document(path)?;
    serde_json::from_value(value).map_err(|e| {
        ConfigError::parse_error(path, DocumentFormat::from_path(path).name(), e.to_string())
    })
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
