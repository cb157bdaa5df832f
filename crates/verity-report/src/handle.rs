//! Shared report handle
//!
//! [`ReportHandle`] is the context object the rest of verity passes
//! around: cheap to clone, every clone addressing the same [`Report`].
//! The lock is held only for the duration of a single capture; it is
//! never held while user code runs.

use crate::details::ModelDetails;
use crate::figure::{Figure, FigureMetadata};
use crate::report::Report;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use verity_params::{ParameterSink, Params};
use verity_result::{FunctionId, LabelSet, ResultPayload, TestPromise, TestResult};

static PROCESS_REPORT: Lazy<ReportHandle> = Lazy::new(ReportHandle::new);

/// The process-wide report, created on first use
#[must_use]
pub fn get_report() -> ReportHandle {
    PROCESS_REPORT.clone()
}

/// Shared, mutable access to one report
#[derive(Clone, Default)]
pub struct ReportHandle {
    inner: Arc<Mutex<Report>>,
}

impl ReportHandle {
    /// Handle to a fresh report stamped now
    #[must_use]
    pub fn new() -> Self {
        Self::from_report(Report::new())
    }

    /// Handle to an existing report
    #[must_use]
    pub fn from_report(report: Report) -> Self {
        Self {
            inner: Arc::new(Mutex::new(report)),
        }
    }

    /// Build a result and append it to the report
    pub fn capture(
        &self,
        key: impl Into<String>,
        labels: LabelSet,
        result: impl Into<ResultPayload>,
        description: impl Into<String>,
    ) -> TestResult {
        self.inner.lock().capture(key, labels, result, description)
    }

    /// Append an already built result
    pub fn record(&self, result: TestResult) -> TestResult {
        self.inner.lock().record(result)
    }

    /// Replace the model details
    pub fn capture_model_details(&self, details: ModelDetails) {
        self.inner.lock().capture_model_details(details);
    }

    /// Set the parameters recorded for a function
    pub fn capture_parameters(&self, func_name: impl Into<String>, params: Params) {
        self.inner.lock().capture_parameters(func_name, params);
    }

    /// Append a figure
    pub fn capture_figure(&self, metadata: FigureMetadata, figure: Figure) {
        self.inner.lock().capture_figure(metadata, figure);
    }

    /// Register a promise, merging with a pending one for the same function
    pub fn register_promise(&self, function_id: FunctionId, promise: TestPromise) {
        self.inner.lock().register_promise(function_id, promise);
    }

    /// Remove all pending promises in registration order
    #[must_use]
    pub fn take_promises(&self) -> Vec<(FunctionId, TestPromise)> {
        self.inner.lock().take_promises()
    }

    /// Number of pending promises
    #[must_use]
    pub fn pending_promises(&self) -> usize {
        self.inner.lock().promises().len()
    }

    /// Creation timestamp
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.inner.lock().timestamp()
    }

    /// Copy of the current details
    #[must_use]
    pub fn details(&self) -> ModelDetails {
        self.inner.lock().model_card().details().clone()
    }

    /// Copy of the results captured so far
    #[must_use]
    pub fn results(&self) -> Vec<TestResult> {
        self.inner.lock().model_card().results().to_vec()
    }

    /// Read the report under the lock
    ///
    /// `f` must not call back into this handle.
    pub fn with_report<R>(&self, f: impl FnOnce(&Report) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Check if two handles address the same report
    #[must_use]
    pub fn ptr_eq(&self, other: &ReportHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl ParameterSink for ReportHandle {
    fn capture_parameters(&self, func_name: &str, params: &Params) {
        ReportHandle::capture_parameters(self, func_name, params.clone());
    }
}

impl fmt::Debug for ReportHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.inner.lock();
        f.debug_struct("ReportHandle")
            .field("timestamp", &report.timestamp())
            .field("results", &report.model_card().results().len())
            .field("pending_promises", &report.promises().len())
            .finish()
    }
}
