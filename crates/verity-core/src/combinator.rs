//! Labeling combinators
//!
//! A [`Combinator`] carries a label set plus optional key and
//! description. Applying it to a check branches on the engine's
//! execution mode at wrap time:
//!
//! - **Scripted**: the returned [`Labeled`] runs the check on every call
//!   and captures a raw outcome into the report. Errors from the check
//!   propagate to the caller and nothing is recorded.
//! - **Interactive**: a [`TestPromise`] is registered under the check's
//!   identity and the returned [`Labeled`] passes calls straight
//!   through. Capture happens when promises are executed.
//!
//! `Labeled` is itself a [`Check`] forwarding the wrapped check's
//! identity, so combinators stack; in interactive mode stacked labels
//! merge into one promise while distinct checks never do.

use crate::check::Check;
use crate::config::NestedCapture;
use crate::mode::ExecutionMode;
use std::fmt;
use std::sync::Arc;
use verity_report::ReportHandle;
use verity_result::{FunctionId, Label, LabelSet, Outcome, TestPromise, TestResult};

/// A label set waiting to be applied to a check
#[derive(Debug, Clone)]
#[must_use]
pub struct Combinator {
    report: ReportHandle,
    mode: ExecutionMode,
    nested: NestedCapture,
    key: Option<String>,
    labels: LabelSet,
    description: Option<String>,
}

impl Combinator {
    pub(crate) fn new(
        report: ReportHandle,
        mode: ExecutionMode,
        nested: NestedCapture,
        labels: LabelSet,
    ) -> Self {
        Self {
            report,
            mode,
            nested,
            key: None,
            labels,
            description: None,
        }
    }

    /// Key results are recorded under; defaults to the declared name
    #[inline]
    pub fn name(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Description recorded with results
    #[inline]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add another label
    #[inline]
    pub fn with_label(mut self, label: impl Into<Label>) -> Self {
        self.labels.insert(label);
        self
    }

    /// Labels this combinator applies
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Wrap a check
    ///
    /// In interactive mode the registered promise later runs the check
    /// with `A::default()`.
    pub fn apply<A, C>(self, check: C) -> Labeled<C>
    where
        A: Default + 'static,
        C: Check<A>,
    {
        let check = Arc::new(check);
        let id = check
            .identity()
            .unwrap_or_else(|| FunctionId::new(check.declared_name(), address_of(&check)));

        if self.mode.is_interactive() {
            let body = Arc::clone(&check);
            let promise = TestPromise::new(
                self.key.clone(),
                self.labels.clone(),
                move || body.invoke(A::default()),
                self.description.clone(),
            );
            tracing::debug!(function = %id, labels = ?self.labels.to_strings(), "registered promise");
            self.report.register_promise(id.clone(), promise);
        }

        Labeled {
            check,
            id,
            key: self.key,
            labels: self.labels,
            description: self.description,
            report: self.report,
            mode: self.mode,
            nested: self.nested,
        }
    }
}

// The promise holds a clone of the `Arc`, so the address stays unique
// while the promise is pending.
fn address_of<C>(check: &Arc<C>) -> usize {
    Arc::as_ptr(check).cast::<()>() as usize
}

/// A check wrapped by a [`Combinator`]
pub struct Labeled<C> {
    check: Arc<C>,
    id: FunctionId,
    key: Option<String>,
    labels: LabelSet,
    description: Option<String>,
    report: ReportHandle,
    mode: ExecutionMode,
    nested: NestedCapture,
}

impl<C> Labeled<C> {
    /// Mode the check was wrapped in
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Labels applied by this layer
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Identity of the wrapped function
    #[inline]
    #[must_use]
    pub fn function_id(&self) -> &FunctionId {
        &self.id
    }

    /// Call the check
    ///
    /// Scripted: returns [`Outcome::Captured`] holding the recorded
    /// result. Interactive: returns whatever the check returned.
    ///
    /// # Errors
    /// The check's own error, unchanged.
    pub fn call<A>(&self, args: A) -> anyhow::Result<Outcome>
    where
        C: Check<A>,
    {
        let outcome = self.check.invoke(args)?;
        if self.mode.is_interactive() {
            return Ok(outcome);
        }
        Ok(Outcome::Captured(
            self.capture(self.check.declared_name(), outcome),
        ))
    }

    fn capture(&self, declared_name: &str, outcome: Outcome) -> TestResult {
        let description = self.description.clone().unwrap_or_default();
        match outcome {
            Outcome::Raw(payload) => {
                let key = self
                    .key
                    .clone()
                    .unwrap_or_else(|| declared_name.to_string());
                self.report
                    .capture(key, self.labels.clone(), payload, description)
            }
            Outcome::Captured(inner) => match self.nested {
                NestedCapture::Skip => inner,
                NestedCapture::Merge => {
                    let (inner_key, inner_labels, payload, inner_description, success) =
                        inner.into_parts();
                    let key = self.key.clone().unwrap_or(inner_key);
                    let description = self.description.clone().unwrap_or(inner_description);
                    let labels = inner_labels.union(&self.labels);
                    let result = TestResult::new(key, labels, payload, description);
                    self.report.record(match success {
                        Some(flag) => result.with_success(flag),
                        None => result,
                    })
                }
            },
        }
    }
}

impl<A, C> Check<A> for Labeled<C>
where
    C: Check<A>,
{
    fn declared_name(&self) -> &str {
        self.check.declared_name()
    }

    fn identity(&self) -> Option<FunctionId> {
        Some(self.id.clone())
    }

    fn invoke(&self, args: A) -> anyhow::Result<Outcome> {
        self.call(args)
    }
}

impl<C> Clone for Labeled<C> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            id: self.id.clone(),
            key: self.key.clone(),
            labels: self.labels.clone(),
            description: self.description.clone(),
            report: self.report.clone(),
            mode: self.mode,
            nested: self.nested,
        }
    }
}

impl<C> fmt::Debug for Labeled<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Labeled")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("labels", &self.labels)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
