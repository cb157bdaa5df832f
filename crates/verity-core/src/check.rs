//! Checks: named callables producing an [`Outcome`]

use std::fmt;
use verity_params::{ConfigError, Injected, Params};
use verity_result::{FunctionId, Outcome};

/// A callable check with a declared name
///
/// The declared name is the default result key. Promise merging keys on
/// [`Check::identity`] instead, so distinct checks sharing a name stay
/// apart.
pub trait Check<A>: Send + Sync + 'static {
    /// Name the check was declared with
    fn declared_name(&self) -> &str;

    /// Identity of the function this check wraps
    ///
    /// `None` for a plain check: the combinator applying it assigns one.
    /// Wrappers forward the wrapped check's identity.
    fn identity(&self) -> Option<FunctionId> {
        None
    }

    /// Run the check
    ///
    /// # Errors
    /// Whatever the check body returns.
    fn invoke(&self, args: A) -> anyhow::Result<Outcome>;
}

/// A named closure
///
/// The closure takes one argument (use a tuple for several, `()` for
/// none) and returns `Result<R, E>` where `R` converts into an
/// [`Outcome`]: a number, string, bool, table, `()` or a [`TestResult`].
///
/// [`TestResult`]: verity_result::TestResult
#[derive(Clone)]
pub struct TestFn<F> {
    name: String,
    func: F,
}

impl<F> TestFn<F> {
    /// Name a closure
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    /// Declared name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TestFn<()> {
    /// Name a closure taking no arguments
    pub fn nullary<R: 'static, E: 'static>(
        name: impl Into<String>,
        func: impl Fn() -> Result<R, E> + Send + Sync + 'static,
    ) -> TestFn<impl Fn(()) -> Result<R, E> + Send + Sync + 'static> {
        TestFn::new(name, move |()| func())
    }
}

impl<A, F, R, E> Check<A> for TestFn<F>
where
    F: Fn(A) -> Result<R, E> + Send + Sync + 'static,
    R: Into<Outcome>,
    E: Into<anyhow::Error>,
{
    fn declared_name(&self) -> &str {
        &self.name
    }

    fn invoke(&self, args: A) -> anyhow::Result<Outcome> {
        (self.func)(args).map(Into::into).map_err(Into::into)
    }
}

impl<F> fmt::Debug for TestFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFn").field("name", &self.name).finish()
    }
}

impl<F, R, E> Check<Params> for Injected<F>
where
    F: Fn(&Params) -> Result<R, E> + Send + Sync + 'static,
    R: Into<Outcome>,
    E: From<ConfigError> + Into<anyhow::Error>,
{
    fn declared_name(&self) -> &str {
        self.signature().name()
    }

    fn invoke(&self, args: Params) -> anyhow::Result<Outcome> {
        self.call(args).map(Into::into).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verity_result::{ResultPayload, TestResult};

    #[test]
    fn closure_outcome_conversion() {
        let check = TestFn::new("double", |x: f64| Ok::<_, anyhow::Error>(x * 2.0));
        assert_eq!(check.name(), "double");
        let outcome = check.invoke(2.0).unwrap();
        assert_eq!(outcome.payload(), &ResultPayload::Number(4.0));
    }

    #[test]
    fn nullary_unit_return_passes() {
        let check = TestFn::nullary("smoke", || Ok::<_, anyhow::Error>(()));
        let outcome = check.invoke(()).unwrap();
        assert_eq!(outcome.payload(), &ResultPayload::Bool(true));
    }

    #[test]
    fn errors_are_returned() {
        let check = TestFn::nullary("broken", || Err::<f64, _>(anyhow::anyhow!("no data")));
        let err = check.invoke(()).unwrap_err();
        assert_eq!(err.to_string(), "no data");
    }

    #[test]
    fn captured_results_pass_through() {
        let check = TestFn::nullary("inner", || {
            Ok::<_, anyhow::Error>(TestResult::new("k", Default::default(), 1.0, ""))
        });
        assert!(matches!(check.invoke(()).unwrap(), Outcome::Captured(_)));
    }
}
