//! Verity Report
//!
//! Aggregates everything a run captures into one model card and writes it
//! to disk:
//! - **Report / ModelCard**: timestamp, details, parameters, figures, results
//! - **ReportHandle**: shared handle passed to combinators; `get_report()`
//!   returns the process-wide one
//! - **ReportWriter**: `<root>/<DDMMYYYY_HHMMSS>_<title>/report.json`
//!
//! # Example
//!
//! ```rust
//! use verity_report::{ModelDetails, ReportHandle, ReportWriter};
//! use verity_result::TestLabel;
//!
//! let report = ReportHandle::new();
//! report.capture_model_details(ModelDetails::new("Credit Model"));
//! report.capture("auc", TestLabel::Accuracy.into(), 0.91, "holdout AUC");
//!
//! let root = tempfile::tempdir().unwrap();
//! let path = ReportWriter::new(root.path()).flush(&report).unwrap();
//! assert!(path.ends_with("report.json"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod details;
pub mod error;
pub mod figure;
pub mod handle;
pub mod persistence;
pub mod report;

// Re-exports
pub use details::{ModelDetails, DEFAULT_TITLE};
pub use error::PersistError;
pub use figure::{Figure, FigureEntry, FigureFormat, FigureMetadata};
pub use handle::{get_report, ReportHandle};
pub use persistence::{list_reports, ReportDocument, ReportWriter, ResultRecord, REPORT_FILE};
pub use report::{ModelCard, PromiseRegistry, Report, DIRECTORY_TIMESTAMP_FORMAT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
