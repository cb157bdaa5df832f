//! Model-details combinator
//!
//! Loads a details document on every call (or reuses the report's current
//! details), hands it to the function as the `details` argument when the
//! signature declares one, and records it in the report after the call
//! returns.

use crate::check::Check;
use std::path::{Path, PathBuf};
use verity_params::{Params, Signature};
use verity_report::{ModelDetails, ReportHandle};
use verity_result::Outcome;

/// Argument name the details are passed under
pub const DETAILS_PARAM: &str = "details";

/// Wraps functions with model-details capture
#[derive(Debug, Clone)]
pub struct DetailsInjector {
    report: ReportHandle,
    path: Option<PathBuf>,
}

impl DetailsInjector {
    /// Create injector; without a path the report's current details are used
    pub fn new(report: ReportHandle, path: Option<&Path>) -> Self {
        Self {
            report,
            path: path.map(Path::to_path_buf),
        }
    }

    /// Details document path
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Wrap a function
    pub fn wrap<F>(self, signature: Signature, func: F) -> WithDetails<F> {
        WithDetails {
            injector: self,
            signature,
            func,
        }
    }

    fn resolve(&self) -> anyhow::Result<ModelDetails> {
        match &self.path {
            Some(path) => Ok(ModelDetails::load(path)?),
            None => Ok(self.report.details()),
        }
    }
}

/// A function wrapped by [`DetailsInjector::wrap`]
#[derive(Debug, Clone)]
pub struct WithDetails<F> {
    injector: DetailsInjector,
    signature: Signature,
    func: F,
}

impl<F> WithDetails<F> {
    /// Signature of the wrapped function
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Call the function, then capture the details
    ///
    /// # Errors
    /// A missing or malformed details document aborts the call before
    /// the function runs; the function's own errors propagate and
    /// nothing is captured.
    pub fn call<R, E>(&self, mut kwargs: Params) -> anyhow::Result<R>
    where
        F: Fn(&Params) -> Result<R, E>,
        E: Into<anyhow::Error>,
    {
        let details = self.injector.resolve()?;
        if self.signature.accepts(DETAILS_PARAM) {
            kwargs.set_serialized(DETAILS_PARAM, &details)?;
        }

        let output = (self.func)(&kwargs).map_err(Into::<anyhow::Error>::into)?;

        tracing::debug!(function = self.signature.name(), title = %details.title, "captured model details");
        self.injector.report.capture_model_details(details);
        Ok(output)
    }
}

impl<F, R, E> Check<Params> for WithDetails<F>
where
    F: Fn(&Params) -> Result<R, E> + Send + Sync + 'static,
    R: Into<Outcome>,
    E: Into<anyhow::Error>,
{
    fn declared_name(&self) -> &str {
        self.signature.name()
    }

    fn invoke(&self, args: Params) -> anyhow::Result<Outcome> {
        self.call(args).map(Into::into)
    }
}
