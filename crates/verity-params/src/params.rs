//! Keyword arguments and function signatures
//!
//! Rust closures carry no parameter names, so every function taking part
//! in injection is paired with a [`Signature`] naming its parameters.
//! Arguments travel as [`Params`], an ordered name-to-value map with typed
//! access through serde.

use crate::error::ParamError;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared name and parameter names of a function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    name: String,
    params: Vec<String>,
}

impl Signature {
    /// Create signature
    pub fn new<I, S>(name: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Signature of a function taking no named parameters
    pub fn nullary(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Declared function name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names, in order
    #[inline]
    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Check if the function declares a parameter
    #[inline]
    #[must_use]
    pub fn accepts(&self, param: &str) -> bool {
        self.params.iter().any(|p| p == param)
    }
}

/// Ordered keyword arguments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    values: IndexMap<String, Value>,
}

impl Params {
    /// Create empty argument map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// With a value set
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a serializable value
    ///
    /// # Errors
    /// `ParamError::InvalidType` if the value cannot be represented.
    pub fn set_serialized<T: Serialize>(
        &mut self,
        name: impl Into<String>,
        value: &T,
    ) -> Result<(), ParamError> {
        let name = name.into();
        let value = serde_json::to_value(value).map_err(|e| ParamError::InvalidType {
            name: name.clone(),
            message: e.to_string(),
        })?;
        self.values.insert(name, value);
        Ok(())
    }

    /// Typed value
    ///
    /// # Errors
    /// - `ParamError::Missing` if no value is set
    /// - `ParamError::InvalidType` if it does not deserialize into `T`
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, ParamError> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| ParamError::Missing(name.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|e| ParamError::InvalidType {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Typed value, or `default` when unset
    ///
    /// # Errors
    /// `ParamError::InvalidType` if a value is set but has the wrong shape.
    pub fn get_or<T: DeserializeOwned>(&self, name: &str, default: T) -> Result<T, ParamError> {
        match self.get(name) {
            Err(ParamError::Missing(_)) => Ok(default),
            other => other,
        }
    }

    /// Deserialize the whole map into a struct
    ///
    /// # Errors
    /// `ParamError::InvalidType` if the arguments do not fit `T`.
    pub fn to_struct<T: DeserializeOwned>(&self) -> Result<T, ParamError> {
        serde_json::to_value(&self.values)
            .and_then(serde_json::from_value)
            .map_err(|e| ParamError::InvalidType {
                name: "*".to_string(),
                message: e.to_string(),
            })
    }

    /// Raw value
    #[inline]
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check if a value is set
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Number of arguments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn signature_accepts_declared_params() {
        let sig = Signature::new("train", ["lr", "epochs"]);
        assert_eq!(sig.name(), "train");
        assert!(sig.accepts("lr"));
        assert!(!sig.accepts("batch"));
        assert!(Signature::nullary("f").params().is_empty());
    }

    #[test]
    fn typed_access() {
        let params = Params::new().with("lr", 0.01).with("epochs", 3).with("name", "run");
        assert_eq!(params.get::<f64>("lr").unwrap(), 0.01);
        assert_eq!(params.get::<u32>("epochs").unwrap(), 3);
        assert_eq!(params.get::<String>("name").unwrap(), "run");
        assert!(matches!(params.get::<u32>("missing"), Err(ParamError::Missing(_))));
        assert!(matches!(
            params.get::<u32>("name"),
            Err(ParamError::InvalidType { .. })
        ));
        assert_eq!(params.get_or("batch", 32_u32).unwrap(), 32);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut params: Params = [("a", json!(1)), ("b", json!(2))].into_iter().collect();
        params.set("a", 10);
        let names: Vec<_> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(params.raw("a"), Some(&json!(10)));
    }

    #[test]
    fn to_struct() {
        #[derive(Deserialize)]
        struct Hyper {
            lr: f64,
            epochs: u32,
        }
        let params = Params::new().with("lr", 0.5).with("epochs", 2);
        let hyper: Hyper = params.to_struct().unwrap();
        assert_eq!(hyper.lr, 0.5);
        assert_eq!(hyper.epochs, 2);
    }

    #[test]
    fn serializes_as_mapping() {
        let params = Params::new().with("x", 2);
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"x": 2}));
    }
}
