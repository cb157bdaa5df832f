//! Execution mode detection
//!
//! Interactive sessions (notebook kernels) register checks as promises
//! and run them later in a batch; scripted runs capture on every call.
//! The mode is resolved once per process and consulted when a check is
//! wrapped, never when it is called.

use crate::error::VerityError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Variable forcing the mode (`interactive` or `scripted`)
pub const MODE_VAR: &str = "VERITY_MODE";

/// Variables set by notebook kernels
pub const KERNEL_MARKERS: [&str; 2] = ["EVCXR_IS_RUNTIME", "JPY_PARENT_PID"];

static PROCESS_MODE: Lazy<ExecutionMode> = Lazy::new(|| ExecutionMode::detect(&EnvDetector));

/// How labeled checks are wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Register promises, run them in a batch
    Interactive,
    /// Capture on every call
    #[default]
    Scripted,
}

impl ExecutionMode {
    /// Mode of this process, detected from the environment on first use
    #[must_use]
    pub fn current() -> Self {
        *PROCESS_MODE
    }

    /// Classify using a detector
    #[must_use]
    pub fn detect(detector: &dyn ModeDetector) -> Self {
        if detector.is_interactive() {
            Self::Interactive
        } else {
            Self::Scripted
        }
    }

    /// Check for interactive mode
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Interactive)
    }

    /// Lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Scripted => "scripted",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutionMode {
    type Err = VerityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(Self::Interactive),
            "scripted" => Ok(Self::Scripted),
            _ => Err(VerityError::InvalidMode(s.to_string())),
        }
    }
}

/// Answers whether the process runs in an interactive session
pub trait ModeDetector: Send + Sync {
    /// True inside a notebook-like shell
    fn is_interactive(&self) -> bool;
}

/// Detects the mode from environment variables
///
/// `VERITY_MODE` wins when it holds a valid mode name; otherwise the
/// presence of a notebook kernel marker means interactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvDetector;

impl EnvDetector {
    /// Classify using an arbitrary variable lookup
    pub fn classify(lookup: impl Fn(&str) -> Option<String>) -> bool {
        if let Some(forced) = lookup(MODE_VAR) {
            match forced.parse::<ExecutionMode>() {
                Ok(mode) => return mode.is_interactive(),
                Err(err) => tracing::warn!(%err, "ignoring {MODE_VAR}"),
            }
        }
        KERNEL_MARKERS.iter().any(|var| lookup(var).is_some())
    }
}

impl ModeDetector for EnvDetector {
    fn is_interactive(&self) -> bool {
        Self::classify(|var| std::env::var(var).ok())
    }
}

/// Detector with a fixed answer
#[derive(Debug, Clone, Copy)]
pub struct FixedDetector(pub ExecutionMode);

impl ModeDetector for FixedDetector {
    fn is_interactive(&self) -> bool {
        self.0.is_interactive()
    }
}
