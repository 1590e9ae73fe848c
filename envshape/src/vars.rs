//! The validated result object

use crate::error::EnvError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Validated variables keyed by output key.
///
/// Produced fresh by every load. Keys iterate in schema declaration order.
/// Values are typed JSON: a variable declared with `parse::<u16>()` is
/// stored as a number, one declared with `string()` as a string. With `skip_validation` every value is the raw string, or
/// `null` when the variable was absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvVars {
    values: Map<String, Value>,
}

impl EnvVars {
    pub(crate) fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// String value at `key`, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed value at `key`.
    ///
    /// # Errors
    ///
    /// [`EnvError::Shape`] if the key is missing or the value does not
    /// deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, EnvError> {
        let value = self
            .values
            .get(key)
            .ok_or_else(|| EnvError::shape(key, "missing from the validated variables"))?;
        T::deserialize(value).map_err(|e| EnvError::shape(key, e))
    }

    /// Typed value at `key`, `None` if the key is missing or `null`.
    pub fn get_opt_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, EnvError> {
        match self.values.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| EnvError::shape(key, e)),
        }
    }

    /// Deserialize the whole object, keyed by output key, into `T`.
    pub fn to_struct<T: DeserializeOwned>(&self) -> Result<T, EnvError> {
        T::deserialize(Value::Object(self.values.clone()))
            .map_err(|e| EnvError::shape("*", e))
    }

    /// Check that every key in `keys` is present.
    ///
    /// This is the runtime counterpart of a statically declared result shape:
    /// call it once at startup with the keys the program expects.
    pub fn expect_keys<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), EnvError> {
        match keys.iter().find(|k| !self.values.contains_key(k.as_ref())) {
            Some(missing) => Err(EnvError::shape(
                missing.as_ref(),
                "expected key is not produced by the schema",
            )),
            None => Ok(()),
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl<'a> IntoIterator for &'a EnvVars {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
