//! Deferred checks
//!
//! A [`TestPromise`] is a labeled check registered in an interactive
//! session and run later in a batch. Executing it consumes it and yields
//! exactly one [`TestResult`]; failures (returned errors and panics) are
//! caught and recorded instead of propagating.

use crate::label::LabelSet;
use crate::payload::ErrorInfo;
use crate::result::{Outcome, TestResult};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Identity of the function behind a promise
///
/// Registrations merge only when their ids are equal. The name is the
/// function's declared name and serves as the default result key; the
/// address tells apart distinct functions declared under the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionId {
    name: String,
    address: usize,
}

impl FunctionId {
    /// Create id
    pub fn new(name: impl Into<String>, address: usize) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// Declared name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address of the function value
    #[inline]
    #[must_use]
    pub fn address(&self) -> usize {
        self.address
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:#x}", self.name, self.address)
    }
}

/// Boxed check body run by a promise
pub type PromiseFn = Box<dyn FnOnce() -> anyhow::Result<Outcome> + Send>;

/// A registered, not yet executed, labeled check
pub struct TestPromise {
    key: Option<String>,
    labels: LabelSet,
    func: PromiseFn,
    description: Option<String>,
}

impl TestPromise {
    /// Create promise
    pub fn new<F>(
        key: Option<String>,
        labels: LabelSet,
        func: F,
        description: Option<String>,
    ) -> Self
    where
        F: FnOnce() -> anyhow::Result<Outcome> + Send + 'static,
    {
        Self {
            key,
            labels,
            func: Box::new(func),
            description,
        }
    }

    /// Explicit key, if one was given
    #[inline]
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Labels collected so far
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Description, if one was given
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Merge a later registration for the same function
    ///
    /// Labels are unioned in order. Key and description keep the first
    /// value that was set; `other` only fills gaps. `other`'s body is
    /// dropped since both wrap the same function.
    pub fn merge(&mut self, other: TestPromise) {
        self.labels.merge(&other.labels);
        if self.key.is_none() {
            self.key = other.key;
        }
        if self.description.is_none() {
            self.description = other.description;
        }
    }

    /// Run the check and record its outcome
    ///
    /// `default_key` is used when no explicit key was given.
    #[must_use]
    pub fn execute(self, default_key: &str) -> TestResult {
        let Self {
            key,
            mut labels,
            func,
            description,
        } = self;
        let mut key = key.unwrap_or_else(|| default_key.to_string());
        let mut description = description;

        let (payload, success) = match panic::catch_unwind(AssertUnwindSafe(func)) {
            Ok(Ok(Outcome::Raw(payload))) => (payload, true),
            Ok(Ok(Outcome::Captured(inner))) => {
                let (inner_key, inner_labels, payload, inner_description, inner_success) =
                    inner.into_parts();
                labels.merge(&inner_labels);
                if key.is_empty() {
                    key = inner_key;
                }
                if description.is_none() {
                    description = Some(inner_description);
                }
                (payload, inner_success.unwrap_or(true))
            }
            Ok(Err(err)) => (ErrorInfo::from_error(&err).into(), false),
            Err(panic) => (ErrorInfo::from_panic(panic.as_ref()).into(), false),
        };

        TestResult::new(key, labels, payload, description.unwrap_or_default())
            .with_success(success)
    }
}

impl fmt::Debug for TestPromise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestPromise")
            .field("key", &self.key)
            .field("labels", &self.labels)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::TestLabel;
    use crate::payload::ResultPayload;
    use pretty_assertions::assert_eq;

    fn labels(names: &[&str]) -> LabelSet {
        names.iter().copied().collect()
    }

    #[test]
    fn merge_unions_labels_and_keeps_first_values() {
        let mut first = TestPromise::new(
            None,
            labels(&["a", "b"]),
            || Ok(Outcome::from(1.0)),
            Some("first".into()),
        );
        let second = TestPromise::new(
            Some("named".into()),
            labels(&["b", "c"]),
            || Ok(Outcome::from(2.0)),
            Some("second".into()),
        );

        first.merge(second);

        assert_eq!(first.labels().to_strings(), vec!["a", "b", "c"]);
        assert_eq!(first.key(), Some("named"));
        assert_eq!(first.description(), Some("first"));
    }

    #[test]
    fn function_ids_differ_by_address() {
        let a = FunctionId::new("check", 0x10);
        let b = FunctionId::new("check", 0x20);
        assert_ne!(a, b);
        assert_eq!(a, FunctionId::new("check", 0x10));
        assert_eq!(a.to_string(), "check@0x10");
    }

    #[test]
    fn execute_success() {
        let promise = TestPromise::new(
            None,
            TestLabel::Accuracy.into(),
            || Ok(Outcome::from(1.0)),
            None,
        );
        let result = promise.execute("accuracy_check");

        assert_eq!(result.key(), "accuracy_check");
        assert_eq!(result.result(), &ResultPayload::Number(1.0));
        assert_eq!(result.success(), Some(true));
    }

    #[test]
    fn execute_returned_error() {
        let promise = TestPromise::new(
            Some("broken".into()),
            LabelSet::new(),
            || Err(anyhow::anyhow!("dataset missing")),
            None,
        );
        let result = promise.execute("unused");

        assert_eq!(result.key(), "broken");
        assert_eq!(result.success(), Some(false));
        let info = result.result().as_error().unwrap();
        assert_eq!(info.kind, "error");
        assert_eq!(info.message, "dataset missing");
    }

    #[test]
    fn execute_panic_is_caught() {
        let promise = TestPromise::new(
            None,
            LabelSet::new(),
            || panic!("threshold exceeded"),
            None,
        );
        let result = promise.execute("panicky");

        assert_eq!(result.success(), Some(false));
        let info = result.result().as_error().unwrap();
        assert_eq!(info.kind, "panic");
        assert_eq!(info.message, "threshold exceeded");
    }

    #[test]
    fn execute_nested_result_merges_labels() {
        let promise = TestPromise::new(
            None,
            labels(&["fairness"]),
            || {
                Ok(Outcome::from(TestResult::new(
                    "inner",
                    labels(&["unit"]),
                    0.2,
                    "inner description",
                )))
            },
            None,
        );
        let result = promise.execute("outer");

        assert_eq!(result.key(), "outer");
        assert_eq!(result.labels().to_strings(), vec!["fairness", "unit"]);
        assert_eq!(result.description(), "inner description");
        assert_eq!(result.success(), Some(true));
    }
}
