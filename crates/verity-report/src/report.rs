//! Report aggregate
//!
//! One [`Report`] per run: a creation timestamp, the model card being
//! assembled, and the promises registered in interactive sessions.
//! Every mutation appends to a list or replaces a single named slot;
//! nothing is ever removed from the card.

use crate::details::ModelDetails;
use crate::figure::{Figure, FigureEntry, FigureMetadata};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use verity_params::Params;
use verity_result::{FunctionId, LabelSet, ResultPayload, TestPromise, TestResult};

/// Format of the timestamp prefix in report directory names
pub const DIRECTORY_TIMESTAMP_FORMAT: &str = "%d%m%Y_%H%M%S";

/// The aggregated document for one run
#[derive(Debug, Clone, Default)]
pub struct ModelCard {
    details: ModelDetails,
    parameters: IndexMap<String, Params>,
    figures: Vec<FigureEntry>,
    results: Vec<TestResult>,
}

impl ModelCard {
    /// Model details
    #[inline]
    #[must_use]
    pub fn details(&self) -> &ModelDetails {
        &self.details
    }

    /// Parameters by function name
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &IndexMap<String, Params> {
        &self.parameters
    }

    /// Figures in capture order
    #[inline]
    #[must_use]
    pub fn figures(&self) -> &[FigureEntry] {
        &self.figures
    }

    /// Results in capture order
    #[inline]
    #[must_use]
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }
}

/// Promises awaiting execution, keyed by function identity
///
/// Registering a key twice merges the promises; iteration follows first
/// registration order.
#[derive(Debug, Default)]
pub struct PromiseRegistry {
    promises: IndexMap<FunctionId, TestPromise>,
}

impl PromiseRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a promise, merging with an existing one for the same function
    pub fn register(&mut self, function_id: FunctionId, promise: TestPromise) {
        match self.promises.get_mut(&function_id) {
            Some(existing) => existing.merge(promise),
            None => {
                self.promises.insert(function_id, promise);
            }
        }
    }

    /// Pending promise for a function
    #[must_use]
    pub fn get(&self, function_id: &FunctionId) -> Option<&TestPromise> {
        self.promises.get(function_id)
    }

    /// Remove and return all promises in registration order
    pub fn drain(&mut self) -> Vec<(FunctionId, TestPromise)> {
        self.promises.drain(..).collect()
    }

    /// Number of pending promises
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.promises.len()
    }

    /// Check if nothing is pending
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.promises.is_empty()
    }
}

/// Report for one run
#[derive(Debug)]
pub struct Report {
    timestamp: DateTime<Local>,
    model_card: ModelCard,
    promises: PromiseRegistry,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Create empty report stamped with the current local time
    #[must_use]
    pub fn new() -> Self {
        Self::with_timestamp(Local::now())
    }

    /// Create empty report with a fixed timestamp
    #[must_use]
    pub fn with_timestamp(timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            model_card: ModelCard::default(),
            promises: PromiseRegistry::new(),
        }
    }

    /// Creation time; never changes
    #[inline]
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Model card under construction
    #[inline]
    #[must_use]
    pub fn model_card(&self) -> &ModelCard {
        &self.model_card
    }

    /// Pending promises
    #[inline]
    #[must_use]
    pub fn promises(&self) -> &PromiseRegistry {
        &self.promises
    }

    /// Directory name `<DDMMYYYY_HHMMSS>_<title>` for this report
    #[must_use]
    pub fn directory_name(&self) -> String {
        format!(
            "{}_{}",
            self.timestamp.format(DIRECTORY_TIMESTAMP_FORMAT),
            self.model_card.details.slug()
        )
    }

    /// Build a result and append it
    pub fn capture(
        &mut self,
        key: impl Into<String>,
        labels: LabelSet,
        result: impl Into<ResultPayload>,
        description: impl Into<String>,
    ) -> TestResult {
        self.record(TestResult::new(key, labels, result, description))
    }

    /// Append an already built result
    pub fn record(&mut self, result: TestResult) -> TestResult {
        tracing::debug!(key = result.key(), labels = ?result.labels().to_strings(), "captured result");
        self.model_card.results.push(result.clone());
        result
    }

    /// Replace the details section
    pub fn capture_model_details(&mut self, details: ModelDetails) {
        self.model_card.details = details;
    }

    /// Set the parameters recorded for a function
    pub fn capture_parameters(&mut self, func_name: impl Into<String>, params: Params) {
        self.model_card.parameters.insert(func_name.into(), params);
    }

    /// Append a figure
    pub fn capture_figure(&mut self, metadata: FigureMetadata, figure: Figure) {
        self.model_card.figures.push(FigureEntry { metadata, figure });
    }

    /// Register a promise for later execution
    pub fn register_promise(&mut self, function_id: FunctionId, promise: TestPromise) {
        self.promises.register(function_id, promise);
    }

    /// Remove all pending promises
    pub fn take_promises(&mut self) -> Vec<(FunctionId, TestPromise)> {
        self.promises.drain()
    }
}
