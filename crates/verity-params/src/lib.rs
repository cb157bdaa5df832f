//! Verity Parameter Injection
//!
//! Overlays externally configured values onto a function's keyword
//! arguments by name.
//!
//! # Architecture
//!
//! ```text
//! params.yaml → load_document → global section → function section → Params → func(&Params)
//!                                                                       ↓
//!                                                               ParameterSink (report)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use verity_params::{ParamInjector, Params, Signature};
//!
//! let train = ParamInjector::new("params.yaml")
//!     .inject(Signature::new("train", ["lr", "epochs"]), |p: &Params| {
//!         let lr: f64 = p.get("lr")?;
//!         Ok::<_, anyhow::Error>(lr)
//!     });
//!
//! let lr = train.call(Params::new())?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod document;
pub mod error;
pub mod injector;
pub mod params;

// Re-exports
pub use document::{load_as, load_document, load_mapping, DocumentFormat};
pub use error::{ConfigError, ParamError};
pub use injector::{Injected, ParamInjector, ParameterSink, GLOBAL_SECTION};
pub use params::{Params, Signature};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
