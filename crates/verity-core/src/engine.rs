//! Registration and execution engine
//!
//! The [`Engine`] is the entry point for labeling checks. It owns a
//! report handle and the execution mode resolved for the process, and
//! hands out [`Combinator`]s for each label.
//!
//! # Lifecycle
//!
//! ```text
//! Engine::global() ─► engine.fairness().apply(check) ─► Labeled
//!                                 │
//!          scripted: call ─► capture ─► report.results
//!       interactive: register promise ─► execute_promises ─► report.results
//!                                                                 │
//!                                                    engine.flush() ─► report.json
//! ```

use crate::combinator::Combinator;
use crate::config::{NestedCapture, VerityConfig, DEFAULT_REPORT_ROOT};
use crate::external::{labels_from_markers, ExternalTest};
use crate::figures::FigureReporter;
use crate::mode::ExecutionMode;
use crate::model_details::DetailsInjector;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use verity_params::ParamInjector;
use verity_report::{
    get_report, ModelDetails, PersistError, ReportHandle, ReportWriter, DEFAULT_TITLE,
};
use verity_result::{Label, LabelSet, TestLabel, TestResult, UnknownLabelError};

/// Hands out labeling combinators bound to one report
#[derive(Debug, Clone)]
pub struct Engine {
    report: ReportHandle,
    mode: ExecutionMode,
    nested: NestedCapture,
    report_root: PathBuf,
}

impl Engine {
    /// Create engine for a report and mode with default settings
    pub fn new(report: ReportHandle, mode: ExecutionMode) -> Self {
        Self {
            report,
            mode,
            nested: NestedCapture::default(),
            report_root: PathBuf::from(DEFAULT_REPORT_ROOT),
        }
    }

    /// Create engine from configuration
    ///
    /// The configured default title is applied if the report still
    /// carries the built-in one.
    pub fn from_config(config: &VerityConfig, report: ReportHandle) -> Self {
        let details = report.details();
        if details.title == DEFAULT_TITLE && config.default_title != DEFAULT_TITLE {
            report.capture_model_details(ModelDetails {
                title: config.default_title.clone(),
                ..details
            });
        }

        Self {
            report,
            mode: config.resolved_mode(),
            nested: config.nested_capture,
            report_root: config.report_root.clone(),
        }
    }

    /// Engine over the process-wide report
    ///
    /// Settings are the defaults plus `VERITY_REPORT_ROOT` and
    /// `VERITY_MODE`; an invalid mode falls back to detection.
    #[must_use]
    pub fn global() -> Self {
        let config = VerityConfig::default().with_env_overrides_lenient();
        Self::from_config(&config, get_report())
    }

    /// With nested capture behavior
    #[inline]
    #[must_use]
    pub fn with_nested_capture(mut self, nested: NestedCapture) -> Self {
        self.nested = nested;
        self
    }

    /// With report root
    #[inline]
    #[must_use]
    pub fn with_report_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.report_root = root.into();
        self
    }

    /// Report captures go to
    #[inline]
    #[must_use]
    pub fn report(&self) -> &ReportHandle {
        &self.report
    }

    /// Execution mode checks are wrapped in
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Nested capture behavior
    #[inline]
    #[must_use]
    pub fn nested_capture(&self) -> NestedCapture {
        self.nested
    }

    /// Directory reports are flushed under
    #[inline]
    #[must_use]
    pub fn report_root(&self) -> &Path {
        &self.report_root
    }

    /// Combinator applying an arbitrary label set
    pub fn label<I, L>(&self, labels: I) -> Combinator
    where
        I: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        Combinator::new(
            self.report.clone(),
            self.mode,
            self.nested,
            labels.into_iter().collect(),
        )
    }

    /// Combinator applying one label; an empty label applies none
    pub fn test(&self, label: impl Into<Label>) -> Combinator {
        self.label([label.into()])
    }

    /// Model bias check
    pub fn bias(&self) -> Combinator {
        self.test(TestLabel::Bias)
    }

    /// Training-data bias check
    pub fn data_bias(&self) -> Combinator {
        self.test(TestLabel::DataBias)
    }

    /// Fairness check
    pub fn fairness(&self) -> Combinator {
        self.test(TestLabel::Fairness)
    }

    /// Transparency check
    pub fn transparency(&self) -> Combinator {
        self.test(TestLabel::Transparency)
    }

    /// Accountability check
    pub fn accountability(&self) -> Combinator {
        self.test(TestLabel::Accountability)
    }

    /// Accuracy check
    pub fn accuracy(&self) -> Combinator {
        self.test(TestLabel::Accuracy)
    }

    /// Unit test
    pub fn unit(&self) -> Combinator {
        self.test(TestLabel::Unit)
    }

    /// Integration test
    pub fn integration(&self) -> Combinator {
        self.test(TestLabel::Integration)
    }

    /// Minimum-functionality test
    pub fn minimum_functionality(&self) -> Combinator {
        self.test(TestLabel::MinimumFunctionality)
    }

    /// Run every registered promise in registration order
    ///
    /// Each promise is isolated: a failing or panicking check is recorded
    /// as a failed result and the remaining promises still run.
    pub fn execute_promises(&self) -> Vec<TestResult> {
        let promises = self.report.take_promises();
        tracing::info!(count = promises.len(), "executing promises");

        promises
            .into_iter()
            .map(|(function_id, promise)| {
                let result = promise.execute(function_id.name());
                if result.is_success() {
                    tracing::info!(key = result.key(), labels = ?result.labels().to_strings(), "PASSED");
                } else {
                    let reason = result
                        .result()
                        .as_error()
                        .map(|e| e.message.clone())
                        .unwrap_or_default();
                    tracing::warn!(key = result.key(), labels = ?result.labels().to_strings(), %reason, "FAILED");
                }
                self.report.record(result)
            })
            .collect()
    }

    /// Write the report under the configured root
    ///
    /// # Errors
    /// `PersistError` if serialization or writing fails.
    pub fn flush(&self) -> Result<PathBuf, PersistError> {
        ReportWriter::new(&self.report_root).flush(&self.report)
    }

    /// Parameter injector reporting into this engine's report
    pub fn using_params(&self, path: impl Into<PathBuf>) -> ParamInjector {
        ParamInjector::new(path).with_sink(Arc::new(self.report.clone()))
    }

    /// Model-details combinator
    pub fn model_details(&self, path: Option<&Path>) -> DetailsInjector {
        DetailsInjector::new(self.report.clone(), path)
    }

    /// Figure combinator
    pub fn report_figure(&self, name: Option<&str>) -> FigureReporter {
        FigureReporter::new(self.report.clone(), name)
    }

    /// Record a test finished by an external harness
    ///
    /// # Errors
    /// `UnknownLabelError` if a marker names no label; nothing is recorded.
    pub fn record_external(&self, test: &dyn ExternalTest) -> Result<TestResult, UnknownLabelError> {
        let labels: LabelSet = labels_from_markers(test.markers())?;
        let outcome = test.outcome();
        let result = TestResult::new(test.name(), labels, outcome.result, test.description())
            .with_success(outcome.success);
        Ok(self.report.record(result))
    }
}
