//! Result payloads
//!
//! The value a check produced: a number, text, a boolean verdict, a table,
//! or the error that stopped it. Anything else is carried as
//! [`OpaqueValue`] and rejected when the report is serialized, as are
//! non-finite numbers, which JSON cannot hold.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::any::Any;

/// Payload of a captured result
#[derive(Debug, Clone, PartialEq)]
pub enum ResultPayload {
    /// Numeric metric
    Number(f64),
    /// Free text
    Text(String),
    /// Boolean verdict
    Bool(bool),
    /// Tabular data handle
    Table(Tabular),
    /// Failure information
    Error(ErrorInfo),
    /// Value of a type the report cannot represent
    Opaque(OpaqueValue),
}

impl ResultPayload {
    /// Wrap an arbitrary value that has no supported representation
    #[must_use]
    pub fn opaque<T: ?Sized>(_value: &T) -> Self {
        ResultPayload::Opaque(OpaqueValue::of::<T>())
    }

    /// Check if payload describes a failure
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, ResultPayload::Error(_))
    }

    /// Check if payload signals an unsuccessful check
    ///
    /// An error payload or a `false` verdict.
    #[inline]
    #[must_use]
    pub fn signals_failure(&self) -> bool {
        matches!(self, ResultPayload::Error(_) | ResultPayload::Bool(false))
    }

    /// Numeric value, if any
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResultPayload::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Error information, if any
    #[must_use]
    pub fn as_error(&self) -> Option<&ErrorInfo> {
        match self {
            ResultPayload::Error(info) => Some(info),
            _ => None,
        }
    }
}

impl Serialize for ResultPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultPayload::Number(n) if !n.is_finite() => Err(S::Error::custom(format!(
                "non-finite numeric result `{n}`"
            ))),
            ResultPayload::Number(n) => serializer.serialize_f64(*n),
            ResultPayload::Text(s) => serializer.serialize_str(s),
            ResultPayload::Bool(b) => serializer.serialize_bool(*b),
            ResultPayload::Table(table) => table.serialize(serializer),
            ResultPayload::Error(info) => info.serialize(serializer),
            ResultPayload::Opaque(value) => Err(S::Error::custom(format!(
                "unsupported result payload type `{}`",
                value.type_name()
            ))),
        }
    }
}

macro_rules! numeric_payload {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ResultPayload {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(value: $ty) -> Self {
                    ResultPayload::Number(value as f64)
                }
            }
        )*
    };
}

numeric_payload!(f32, i32, i64, u32, u64, usize);

impl From<f64> for ResultPayload {
    fn from(value: f64) -> Self {
        ResultPayload::Number(value)
    }
}

/// A check that returns nothing and does not fail has passed.
impl From<()> for ResultPayload {
    fn from((): ()) -> Self {
        ResultPayload::Bool(true)
    }
}

impl From<bool> for ResultPayload {
    fn from(value: bool) -> Self {
        ResultPayload::Bool(value)
    }
}

impl From<String> for ResultPayload {
    fn from(value: String) -> Self {
        ResultPayload::Text(value)
    }
}

impl From<&str> for ResultPayload {
    fn from(value: &str) -> Self {
        ResultPayload::Text(value.to_string())
    }
}

impl From<Tabular> for ResultPayload {
    fn from(value: Tabular) -> Self {
        ResultPayload::Table(value)
    }
}

impl From<ErrorInfo> for ResultPayload {
    fn from(value: ErrorInfo) -> Self {
        ResultPayload::Error(value)
    }
}

/// The error-info triple: kind, message, trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// `"error"` for returned errors, `"panic"` for unwinds
    pub kind: String,
    /// Top-level message
    pub message: String,
    /// Cause chain and backtrace, when available
    pub trace: Option<String>,
}

impl ErrorInfo {
    /// Create error info
    #[inline]
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            trace: None,
        }
    }

    /// With trace text
    #[inline]
    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Build from a returned error, keeping its cause chain
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        let info = Self::new("error", err.to_string());
        if err.chain().nth(1).is_some() {
            info.with_trace(format!("{err:?}"))
        } else {
            info
        }
    }

    /// Build from a caught panic payload
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        Self::new("panic", message)
    }
}

/// Opaque handle to tabular data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tabular {
    /// Column names
    pub columns: Vec<String>,
    /// Rows, one value per column
    pub rows: Vec<Vec<Value>>,
}

impl Tabular {
    /// Create empty table with columns
    #[must_use]
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row
    #[must_use]
    pub fn with_row(mut self, row: Vec<Value>) -> Self {
        self.rows.push(row);
        self
    }

    /// Number of rows
    #[inline]
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Value of a type with no supported representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueValue {
    type_name: &'static str,
}

impl OpaqueValue {
    /// Record an opaque value of type `T`
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Rust type name of the captured value
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}
