//! Report persistence
//!
//! Layout on disk:
//!
//! ```text
//! <root>/<DDMMYYYY_HHMMSS>_<title>/report.json
//! <root>/<DDMMYYYY_HHMMSS>_<title>/<index>_<figure title>.<ext>
//! ```
//!
//! The directory name is fixed by the report's creation timestamp, so
//! flushing the same report again overwrites the same files.

use crate::details::ModelDetails;
use crate::error::PersistError;
use crate::figure::{Figure, FigureMetadata};
use crate::handle::ReportHandle;
use crate::report::DIRECTORY_TIMESTAMP_FORMAT;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use verity_params::Params;
use verity_result::{LabelSet, TestResult};

/// File name of the serialized report inside its directory
pub const REPORT_FILE: &str = "report.json";

/// Serialized form of a report
#[derive(Serialize)]
struct ReportView<'a> {
    timestamp: String,
    details: &'a ModelDetails,
    parameters: &'a IndexMap<String, Params>,
    figures: Vec<FigureMetadata>,
    results: &'a [TestResult],
}

/// Writes reports under a root directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    root: PathBuf,
}

impl ReportWriter {
    /// Create writer for a root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory the report will be written to
    #[must_use]
    pub fn report_dir(&self, report: &ReportHandle) -> PathBuf {
        self.root.join(report.with_report(|r| r.directory_name()))
    }

    /// Serialize the report and write it to disk
    ///
    /// Nothing is created on disk if serialization fails. Returns the
    /// path of the written `report.json`.
    ///
    /// # Errors
    /// `PersistError::Serialization` if a captured value cannot be
    /// represented, `PersistError::Io` if the directory or a file cannot
    /// be written.
    pub fn flush(&self, report: &ReportHandle) -> Result<PathBuf, PersistError> {
        let (dir_name, json, figures) = report.with_report(|r| {
            let card = r.model_card();
            let figures: Vec<(String, Figure)> = card
                .figures()
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.file_name(index), entry.figure.clone()))
                .collect();
            let view = ReportView {
                timestamp: r.timestamp().to_rfc3339(),
                details: card.details(),
                parameters: card.parameters(),
                figures: card
                    .figures()
                    .iter()
                    .zip(&figures)
                    .map(|(entry, (file, _))| FigureMetadata {
                        file: Some(file.clone()),
                        ..entry.metadata.clone()
                    })
                    .collect(),
                results: card.results(),
            };
            serde_json::to_string_pretty(&view).map(|json| (r.directory_name(), json, figures))
        })?;

        let dir = self.root.join(dir_name);
        fs::create_dir_all(&dir).map_err(|e| PersistError::io_error(&dir, e))?;

        for (file, figure) in &figures {
            let path = dir.join(file);
            fs::write(&path, figure.bytes()).map_err(|e| PersistError::io_error(&path, e))?;
        }

        let path = dir.join(REPORT_FILE);
        fs::write(&path, json).map_err(|e| PersistError::io_error(&path, e))?;

        tracing::info!(path = %path.display(), figures = figures.len(), "report written");
        Ok(path)
    }
}

/// A result as read back from `report.json`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultRecord {
    /// Result key
    pub key: String,
    /// Labels
    #[serde(default)]
    pub labels: LabelSet,
    /// Payload in its serialized form
    #[serde(default)]
    pub result: Value,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Explicit success flag
    #[serde(default)]
    pub success: Option<bool>,
}

impl ResultRecord {
    /// Check if the result counts as passed
    ///
    /// An explicit flag wins; otherwise an error payload or `false` fails.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self.success {
            Some(flag) => flag,
            None => !matches!(self.result, Value::Bool(false)) && !is_error_value(&self.result),
        }
    }
}

fn is_error_value(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key("kind") && obj.contains_key("message"))
}

/// A persisted report as read back from disk
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDocument {
    /// RFC 3339 creation timestamp
    pub timestamp: String,
    /// Model details
    #[serde(default)]
    pub details: ModelDetails,
    /// Parameters by function name
    #[serde(default)]
    pub parameters: IndexMap<String, Params>,
    /// Figure metadata
    #[serde(default)]
    pub figures: Vec<FigureMetadata>,
    /// Results in capture order
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

impl ReportDocument {
    /// Read a `report.json`, or the one inside a report directory
    ///
    /// # Errors
    /// `PersistError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let path = if path.is_dir() {
            path.join(REPORT_FILE)
        } else {
            path.to_path_buf()
        };
        let content = fs::read_to_string(&path).map_err(|e| PersistError::io_error(&path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Number of passed results
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of failed results
    #[must_use]
    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }
}

/// Report directories under `root`, oldest first
///
/// # Errors
/// `PersistError::Io` if `root` exists but cannot be listed.
pub fn list_reports(root: impl AsRef<Path>) -> Result<Vec<PathBuf>, PersistError> {
    let root = root.as_ref();
    if !root.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(root).map_err(|e| PersistError::io_error(root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PersistError::io_error(root, e))?;
        let path = entry.path();
        if path.join(REPORT_FILE).is_file() {
            dirs.push(path);
        }
    }
    dirs.sort_by_cached_key(|p| {
        let stamp = p
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.get(..15))
            .and_then(|s| chrono::NaiveDateTime::parse_from_str(s, DIRECTORY_TIMESTAMP_FORMAT).ok());
        (stamp, p.clone())
    });
    Ok(dirs)
}
