//! Captured test results

use crate::label::LabelSet;
use crate::payload::{ErrorInfo, ResultPayload, Tabular};
use serde::Serialize;

/// Outcome of one check execution
///
/// Immutable once built. Immediate-mode captures leave `success` unset;
/// promise execution always sets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    key: String,
    labels: LabelSet,
    result: ResultPayload,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
}

impl TestResult {
    /// Create result without an explicit success flag
    pub fn new(
        key: impl Into<String>,
        labels: LabelSet,
        result: impl Into<ResultPayload>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            labels,
            result: result.into(),
            description: description.into(),
            success: None,
        }
    }

    /// With explicit success flag
    #[inline]
    #[must_use]
    pub fn with_success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    /// Result key
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Labels attached to the result
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Captured payload
    #[inline]
    #[must_use]
    pub fn result(&self) -> &ResultPayload {
        &self.result
    }

    /// Free-text description
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit success flag, present only on promise-executed results
    #[inline]
    #[must_use]
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    /// Whether the check passed
    ///
    /// Uses the explicit flag when present, otherwise treats the result as
    /// passed unless its payload signals a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
            .unwrap_or_else(|| !self.result.signals_failure())
    }

    /// Split into parts
    #[must_use]
    pub fn into_parts(self) -> (String, LabelSet, ResultPayload, String, Option<bool>) {
        (
            self.key,
            self.labels,
            self.result,
            self.description,
            self.success,
        )
    }
}

/// What a check function handed back
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A raw value not yet captured
    Raw(ResultPayload),
    /// An already captured result (from a nested combinator)
    Captured(TestResult),
}

impl Outcome {
    /// Captured result, if any
    #[must_use]
    pub fn into_result(self) -> Option<TestResult> {
        match self {
            Outcome::Captured(result) => Some(result),
            Outcome::Raw(_) => None,
        }
    }

    /// The payload, whether raw or captured
    #[must_use]
    pub fn payload(&self) -> &ResultPayload {
        match self {
            Outcome::Raw(payload) => payload,
            Outcome::Captured(result) => result.result(),
        }
    }
}

impl From<TestResult> for Outcome {
    fn from(result: TestResult) -> Self {
        Outcome::Captured(result)
    }
}

impl From<ResultPayload> for Outcome {
    fn from(payload: ResultPayload) -> Self {
        Outcome::Raw(payload)
    }
}

macro_rules! raw_outcome {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Outcome {
                fn from(value: $ty) -> Self {
                    Outcome::Raw(ResultPayload::from(value))
                }
            }
        )*
    };
}

raw_outcome!((), f64, f32, i32, i64, u32, u64, usize, bool, String, &str, Tabular, ErrorInfo);
