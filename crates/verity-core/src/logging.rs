//! Subscriber setup for binaries
//!
//! Libraries only emit `tracing` events; a binary calls [`init`] once.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,verity=info";

/// Install a global subscriber filtered by `RUST_LOG`
///
/// # Errors
/// `TryInitError` if a global subscriber is already installed.
pub fn init(json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).without_time())
            .try_init()
    }
}
