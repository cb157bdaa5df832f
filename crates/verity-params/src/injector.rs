//! Parameter overlay
//!
//! A [`ParamInjector`] overlays values from a configuration document onto
//! a function's keyword arguments before each call:
//!
//! ```yaml
//! global:
//!   seed: 7
//! train:
//!   lr: 0.01
//! ```
//!
//! `global` entries apply first, then the section named after the function,
//! so function entries win. Only keys naming a declared parameter are
//! applied; the rest are ignored, letting one document serve many
//! functions. Configured values override caller-supplied ones.

use crate::document::{kind_of, load_mapping, DocumentFormat};
use crate::error::ConfigError;
use crate::params::{Params, Signature};
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Section applied to every function
pub const GLOBAL_SECTION: &str = "global";

/// Receiver for the final arguments of an injected call
pub trait ParameterSink: Send + Sync {
    /// Record the arguments `func_name` was called with
    fn capture_parameters(&self, func_name: &str, params: &Params);
}

/// Overlays document values onto keyword arguments
#[derive(Clone)]
pub struct ParamInjector {
    path: PathBuf,
    report: bool,
    sink: Option<Arc<dyn ParameterSink>>,
}

impl ParamInjector {
    /// Create injector reading `path` on every call
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            report: true,
            sink: None,
        }
    }

    /// Whether final arguments are reported to the sink
    #[inline]
    #[must_use]
    pub fn report(mut self, report: bool) -> Self {
        self.report = report;
        self
    }

    /// With a sink receiving final arguments
    #[inline]
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn ParameterSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Document path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document and overlay matching values onto `kwargs`
    ///
    /// # Errors
    /// - `ConfigError::NotFound` / `ConfigError::Io` if the document cannot be read
    /// - `ConfigError::Parse` if it is malformed or a section is not a mapping
    pub fn overlay(&self, signature: &Signature, kwargs: &mut Params) -> Result<(), ConfigError> {
        let document = load_mapping(&self.path)?;
        self.apply_section(&document, GLOBAL_SECTION, signature, kwargs)?;
        self.apply_section(&document, signature.name(), signature, kwargs)?;
        Ok(())
    }

    fn apply_section(
        &self,
        document: &Map<String, Value>,
        section: &str,
        signature: &Signature,
        kwargs: &mut Params,
    ) -> Result<(), ConfigError> {
        let entries = match document.get(section) {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                return Err(ConfigError::parse_error(
                    &self.path,
                    DocumentFormat::from_path(&self.path).name(),
                    format!("section '{section}' must be a mapping, found {}", kind_of(other)),
                ))
            }
        };

        for (key, value) in entries {
            if signature.accepts(key) {
                tracing::debug!(function = signature.name(), section, key, "injecting parameter");
                kwargs.set(key.clone(), value.clone());
            }
        }
        Ok(())
    }

    /// Wrap a function so each call receives overlaid arguments
    pub fn inject<F>(self, signature: Signature, func: F) -> Injected<F> {
        Injected {
            injector: self,
            signature,
            func,
        }
    }
}

impl fmt::Debug for ParamInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamInjector")
            .field("path", &self.path)
            .field("report", &self.report)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// A function wrapped by [`ParamInjector::inject`]
#[derive(Debug, Clone)]
pub struct Injected<F> {
    injector: ParamInjector,
    signature: Signature,
    func: F,
}

impl<F> Injected<F> {
    /// Signature of the wrapped function
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Call with caller-supplied arguments
    ///
    /// The document is reloaded on every call. Parameters are reported
    /// only after the function returns successfully.
    ///
    /// # Errors
    /// Document failures (converted into `E`) abort the call before the
    /// function runs; the function's own errors propagate unchanged.
    pub fn call<R, E>(&self, mut kwargs: Params) -> Result<R, E>
    where
        F: Fn(&Params) -> Result<R, E>,
        E: From<ConfigError>,
    {
        self.injector.overlay(&self.signature, &mut kwargs)?;
        let output = (self.func)(&kwargs)?;

        if self.injector.report {
            if let Some(sink) = &self.injector.sink {
                sink.capture_parameters(self.signature.name(), &kwargs);
            }
        }
        Ok(output)
    }
}
