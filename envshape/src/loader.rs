//! Loading declared variables from an environment snapshot

use crate::error::{EnvError, ValidationErrors};
use crate::options::EnvOptions;
use crate::schema::Schema;
use crate::source::{EnvSource, ProcessEnv, RuntimeEnv};
use crate::vars::EnvVars;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A schema paired with options that have been checked against it.
///
/// Building a `Loader` is the fail-fast point for misconfiguration: every
/// `disable_prefix` entry must be a declared variable and appear once, and
/// no two variables may share an output key.
/// After that, [`Loader::load`] can only fail with [`EnvError::Validation`].
#[derive(Debug)]
pub struct Loader {
    schema: Schema,
    options: EnvOptions,
}

impl Loader {
    /// # Errors
    ///
    /// - [`EnvError::UnknownDisablePrefix`] for an entry not declared in `schema`
    /// - [`EnvError::DuplicateDisablePrefix`] for an entry listed twice
    /// - [`EnvError::DuplicateOutputKey`] when two variables resolve to one key
    pub fn new(schema: Schema, options: EnvOptions) -> Result<Self, EnvError> {
        let mut seen = HashSet::new();
        for name in &options.disable_prefix {
            if !schema.contains(name) {
                return Err(EnvError::UnknownDisablePrefix { name: name.clone() });
            }
            if !seen.insert(name.as_str()) {
                return Err(EnvError::DuplicateDisablePrefix { name: name.clone() });
            }
        }
        check_output_keys(&schema, &options)?;

        tracing::debug!(
            vars = schema.len(),
            prefix = options.get_prefix(),
            disabled = options.disable_prefix.len(),
            "Environment loader configured"
        );

        Ok(Self { schema, options })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn options(&self) -> &EnvOptions {
        &self.options
    }

    /// Output keys in schema order.
    pub fn output_keys(&self) -> Vec<String> {
        self.schema
            .names()
            .into_iter()
            .map(|name| self.options.output_key(name))
            .collect()
    }

    /// Load from the process environment.
    pub fn load(&self) -> Result<EnvVars, EnvError> {
        self.load_from(&ProcessEnv)
    }

    /// Load from an arbitrary source.
    ///
    /// All-or-nothing: either every declared variable validates, or the
    /// returned error lists every failing output key. On failure the error
    /// map is also reported through `tracing` at error level.
    pub fn load_from<S: EnvSource + ?Sized>(&self, source: &S) -> Result<EnvVars, EnvError> {
        let runtime_env = self.snapshot(source);

        if self.options.skip_validation {
            tracing::debug!("Skipping validation of environment variables");
            return Ok(self.raw_vars(&runtime_env));
        }

        let transformed = self.transform(&runtime_env);
        match self.schema.validate(&transformed) {
            Ok(data) => {
                let vars = self.rekey_values(data);
                tracing::debug!(vars = vars.len(), "Environment variables validated");
                Ok(vars)
            }
            Err(errors) => {
                let errors = self.rekey_errors(errors);
                tracing::error!(fields = ?errors.fields(), "Invalid environment variables");
                Err(EnvError::Validation(errors))
            }
        }
    }

    fn snapshot<S: EnvSource + ?Sized>(&self, source: &S) -> RuntimeEnv {
        let mut runtime_env = source.snapshot();
        runtime_env.overlay(&self.options.runtime_env);
        if self.options.empty_string_as_undefined {
            runtime_env.drop_empty();
        }
        runtime_env
    }

    /// Logical name -> raw value found at its lookup key; absent keys are left out.
    fn transform(&self, runtime_env: &RuntimeEnv) -> BTreeMap<String, String> {
        let mut transformed = BTreeMap::new();
        for name in self.schema.names() {
            let env_key = self.options.output_key(name);
            match runtime_env.get(&env_key) {
                Some(value) => {
                    transformed.insert(name.to_string(), value.to_string());
                }
                None => tracing::trace!(var = name, env_key = %env_key, "Environment variable not set"),
            }
        }
        transformed
    }

    fn raw_vars(&self, runtime_env: &RuntimeEnv) -> EnvVars {
        let mut values = Map::new();
        for env_key in self.output_keys() {
            let value = runtime_env
                .get(&env_key)
                .map_or(Value::Null, |v| Value::String(v.to_string()));
            values.insert(env_key, value);
        }
        EnvVars::from_map(values)
    }

    fn rekey_values(&self, data: Map<String, Value>) -> EnvVars {
        let values = data
            .into_iter()
            .map(|(name, value)| (self.options.output_key(&name), value))
            .collect();
        EnvVars::from_map(values)
    }

    fn rekey_errors(&self, errors: ValidationErrors) -> ValidationErrors {
        let fields = errors
            .fields()
            .iter()
            .map(|(name, reasons)| (self.options.output_key(name), reasons.clone()))
            .collect();
        ValidationErrors::from_fields(fields)
    }
}

fn check_output_keys(schema: &Schema, options: &EnvOptions) -> Result<(), EnvError> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    for name in schema.names() {
        let key = options.output_key(name);
        if let Some(first) = owners.get(&key) {
            return Err(EnvError::DuplicateOutputKey {
                names: vec![first.to_string(), name.to_string()],
                key,
            });
        }
        owners.insert(key, name);
    }
    Ok(())
}

/// Build a loader and load from the process environment in one step.
///
/// ```rust
/// use envshape::{create_env, validate, EnvOptions, Schema};
///
/// # fn main() -> anyhow::Result<()> {
/// let schema = Schema::new().var("PORT", validate::parse::<u16>())?;
/// let options = EnvOptions::new()
///     .prefix("APP")
///     .runtime_env([("APP_PORT", "8080")]);
///
/// let env = create_env(schema, options)?;
/// assert_eq!(env.get_as::<u16>("APP_PORT")?, 8080);
/// # Ok(())
/// # }
/// ```
pub fn create_env(schema: Schema, options: EnvOptions) -> Result<EnvVars, EnvError> {
    Loader::new(schema, options)?.load()
}
