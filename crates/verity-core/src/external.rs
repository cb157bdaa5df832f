//! Bridge for tests run by an external harness
//!
//! The harness supplies a finished test: its name, the marker names it
//! was tagged with, and how it ended. Markers must name a [`TestLabel`];
//! an unknown marker is an error, not silently dropped.

use verity_result::{ErrorInfo, LabelSet, ResultPayload, TestLabel, UnknownLabelError};

/// How an externally run test ended
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalOutcome {
    /// Recorded payload
    pub result: ResultPayload,
    /// Pass or fail
    pub success: bool,
}

impl ExternalOutcome {
    /// Test passed
    #[must_use]
    pub fn passed() -> Self {
        Self {
            result: ResultPayload::Bool(true),
            success: true,
        }
    }

    /// Test failed with a message
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            result: ResultPayload::Error(ErrorInfo::new("failure", message)),
            success: false,
        }
    }

    /// Test produced a value
    pub fn value(result: impl Into<ResultPayload>, success: bool) -> Self {
        Self {
            result: result.into(),
            success,
        }
    }
}

/// A test finished by an external harness
pub trait ExternalTest {
    /// Test name, used as the result key
    fn name(&self) -> &str;

    /// Marker names the test was tagged with
    fn markers(&self) -> Vec<String>;

    /// Free-text description
    fn description(&self) -> String {
        String::new()
    }

    /// Final outcome
    fn outcome(&self) -> ExternalOutcome;
}

/// Convert marker names into labels
///
/// # Errors
/// `UnknownLabelError` for the first marker that names no label.
pub fn labels_from_markers<I, S>(markers: I) -> Result<LabelSet, UnknownLabelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut labels = LabelSet::new();
    for marker in markers {
        labels.insert(TestLabel::of(marker.as_ref())?);
    }
    Ok(labels)
}
