//! Ordered declaration of environment variables and their validators

use crate::error::{EnvError, ValidationErrors};
use crate::validate::Validator;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered mapping from logical variable name to validator.
///
/// ```rust
/// use envshape::{validate, Schema};
///
/// # fn main() -> Result<(), envshape::EnvError> {
/// let schema = Schema::new()
///     .var("API_URL", validate::url())?
///     .var("PORT", validate::parse::<u16>())?;
/// assert_eq!(schema.names(), vec!["API_URL", "PORT"]);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct Schema {
    vars: Vec<(String, Box<dyn Validator>)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable.
    ///
    /// # Errors
    ///
    /// [`EnvError::DuplicateVar`] if `name` is already declared.
    pub fn var(
        mut self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
    ) -> Result<Self, EnvError> {
        self.insert(name.into(), Box::new(validator))?;
        Ok(self)
    }

    /// Declare a variable with an already boxed validator.
    pub fn var_boxed(
        mut self,
        name: impl Into<String>,
        validator: Box<dyn Validator>,
    ) -> Result<Self, EnvError> {
        self.insert(name.into(), validator)?;
        Ok(self)
    }

    /// Append every declaration of `other`, e.g. a platform preset.
    ///
    /// # Errors
    ///
    /// [`EnvError::DuplicateVar`] if both schemas declare the same name.
    pub fn merge(mut self, other: Schema) -> Result<Self, EnvError> {
        for (name, validator) in other.vars {
            self.insert(name, validator)?;
        }
        Ok(self)
    }

    /// Build from a fixed table whose names are known to be distinct.
    pub(crate) fn from_table(table: Vec<(&str, Box<dyn Validator>)>) -> Self {
        let vars = table
            .into_iter()
            .map(|(name, validator)| (name.to_string(), validator))
            .collect();
        Self { vars }
    }

    fn insert(&mut self, name: String, validator: Box<dyn Validator>) -> Result<(), EnvError> {
        if self.contains(&name) {
            return Err(EnvError::DuplicateVar { name });
        }
        self.vars.push((name, validator));
        Ok(())
    }

    /// Logical names in declaration order.
    ///
    /// Handy as a `disable_prefix` list when a whole fragment should stay unprefixed.
    pub fn names(&self) -> Vec<&str> {
        self.vars.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &dyn Validator)> {
        self.vars.iter().map(|(n, v)| (n.as_str(), &**v))
    }

    /// Validate a whole object keyed by logical name.
    ///
    /// Every declared variable is checked, so the error map lists all
    /// failing names at once. Names missing from `input` are validated as
    /// absent. Keys of `input` that are not declared are ignored.
    pub fn validate(
        &self,
        input: &BTreeMap<String, String>,
    ) -> Result<Map<String, Value>, ValidationErrors> {
        let mut data = Map::new();
        let mut errors = BTreeMap::new();

        for (name, validator) in self.iter() {
            match validator.validate(input.get(name).map(String::as_str)) {
                Ok(Some(value)) => {
                    data.insert(name.to_string(), value);
                }
                Ok(None) => {}
                Err(reasons) => {
                    errors.insert(name.to_string(), reasons);
                }
            }
        }

        if errors.is_empty() {
            Ok(data)
        } else {
            Err(ValidationErrors::from_fields(errors))
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("vars", &self.names()).finish()
    }
}
