//! Testing utilities for the verity workspace
//!
//! Shared fixtures: engines over fresh reports, reports with a fixed
//! timestamp, temporary documents, and canned checks.

#![allow(missing_docs)]

use chrono::{Local, TimeZone};
use std::path::PathBuf;
use tempfile::TempDir;
use verity_core::{Engine, ExecutionMode, ExternalOutcome, ExternalTest, NestedCapture};
use verity_report::{Report, ReportHandle};

/// Timestamp every fixed report carries: 15 Jan 2024 14:30:05 local
pub const FIXED_DIRECTORY_PREFIX: &str = "15012024_143005";

pub fn fixed_report() -> ReportHandle {
    let timestamp = Local
        .with_ymd_and_hms(2024, 1, 15, 14, 30, 5)
        .single()
        .unwrap_or_else(Local::now);
    ReportHandle::from_report(Report::with_timestamp(timestamp))
}

pub fn scripted_engine() -> Engine {
    Engine::new(ReportHandle::new(), ExecutionMode::Scripted)
}

pub fn merging_engine() -> Engine {
    scripted_engine().with_nested_capture(NestedCapture::Merge)
}

pub fn interactive_engine() -> Engine {
    Engine::new(ReportHandle::new(), ExecutionMode::Interactive)
}

/// A temporary directory holding documents for one test
pub struct Documents {
    dir: TempDir,
}

impl Documents {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }
}

impl Default for Documents {
    fn default() -> Self {
        Self::new()
    }
}

/// A test finished by a pretend external harness
#[derive(Debug, Clone)]
pub struct FinishedTest {
    pub name: String,
    pub markers: Vec<String>,
    pub outcome: ExternalOutcome,
}

impl FinishedTest {
    pub fn passed(name: &str, markers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            markers: markers.iter().map(|m| (*m).to_string()).collect(),
            outcome: ExternalOutcome::passed(),
        }
    }

    pub fn failed(name: &str, markers: &[&str], message: &str) -> Self {
        Self {
            outcome: ExternalOutcome::failed(message),
            ..Self::passed(name, markers)
        }
    }
}

impl ExternalTest for FinishedTest {
    fn name(&self) -> &str {
        &self.name
    }

    fn markers(&self) -> Vec<String> {
        self.markers.clone()
    }

    fn outcome(&self) -> ExternalOutcome {
        self.outcome.clone()
    }
}

pub fn failure(message: &str) -> anyhow::Error {
    anyhow::anyhow!(message.to_string())
}
