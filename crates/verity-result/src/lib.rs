//! Verity Result Model
//!
//! Value types shared by every verity component:
//! - **TestLabel / Label / LabelSet**: categorical tags for checks
//! - **ResultPayload**: what a check produced
//! - **TestResult**: an immutable captured outcome
//! - **TestPromise**: a deferred check awaiting batch execution
//!
//! # Example
//!
//! ```rust
//! use verity_result::{LabelSet, TestLabel, TestResult};
//!
//! let labels: LabelSet = [TestLabel::Fairness, TestLabel::Bias].into_iter().collect();
//! let result = TestResult::new("tpr_gap", labels, 0.03, "true positive rate gap");
//!
//! assert_eq!(result.labels().to_strings(), vec!["fairness", "bias"]);
//! assert!(result.is_success());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod label;
pub mod payload;
pub mod promise;
pub mod result;

// Re-exports
pub use error::UnknownLabelError;
pub use label::{Label, LabelMarker, LabelSet, TestLabel};
pub use payload::{ErrorInfo, OpaqueValue, ResultPayload, Tabular};
pub use promise::{FunctionId, PromiseFn, TestPromise};
pub use result::{Outcome, TestResult};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
