//! Verity Core
//!
//! Labeling combinators that turn ordinary checks into recorded,
//! categorised results:
//! - **Engine**: hands out combinators (`fairness()`, `accuracy()`, ...)
//!   bound to a report and an execution mode
//! - **Combinator / Labeled**: wrap a [`Check`]; scripted runs capture on
//!   every call, interactive sessions register promises
//! - **ExecutionMode**: interactive vs scripted, detected once per process
//! - **DetailsInjector / FigureReporter**: model details and figures
//! - **ExternalTest**: results from an external test harness
//!
//! # Example
//!
//! ```rust
//! use verity_core::{Engine, ExecutionMode, TestFn};
//! use verity_report::ReportHandle;
//!
//! let engine = Engine::new(ReportHandle::new(), ExecutionMode::Scripted);
//! let parity = engine
//!     .fairness()
//!     .name("demographic_parity")
//!     .apply(TestFn::nullary("parity", || Ok::<_, anyhow::Error>(0.02)));
//!
//! parity.call(()).unwrap();
//! assert_eq!(engine.report().results()[0].key(), "demographic_parity");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod check;
pub mod combinator;
pub mod config;
pub mod engine;
pub mod error;
pub mod external;
pub mod figures;
pub mod logging;
pub mod mode;
pub mod model_details;

// Re-exports
pub use check::{Check, TestFn};
pub use combinator::{Combinator, Labeled};
pub use config::{NestedCapture, VerityConfig, DEFAULT_REPORT_ROOT, REPORT_ROOT_VAR};
pub use engine::Engine;
pub use error::{Result, VerityError};
pub use external::{labels_from_markers, ExternalOutcome, ExternalTest};
pub use figures::{FigureReporter, Rendered, WithFigure, IMG_METADATA_PARAM};
pub use mode::{EnvDetector, ExecutionMode, FixedDetector, ModeDetector, MODE_VAR};
pub use model_details::{DetailsInjector, WithDetails, DETAILS_PARAM};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for labeling checks
    pub use crate::{Check, Engine, ExecutionMode, Labeled, NestedCapture, TestFn, VerityConfig};
    pub use verity_params::{Params, Signature};
    pub use verity_report::{get_report, ModelDetails, ReportHandle};
    pub use verity_result::{Outcome, TestLabel, TestResult};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
