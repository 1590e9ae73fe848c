//! Validators for raw environment values
//!
//! A [`Validator`] receives the raw string found for one variable (or `None`
//! when the variable is absent) and either produces a typed JSON value or a
//! list of human-readable reasons why the value was rejected.
//!
//! ```rust
//! use envshape::validate::{self, ValidatorExt};
//!
//! let port = validate::parse::<u16>();
//! let api_url = validate::string().url();
//! let log_level = validate::enumeration(["debug", "info", "warn"]).default_raw("info");
//! let token = validate::string().min(8).optional();
//! # let _ = (port, api_url, log_level, token);
//! ```

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Result of validating a single variable.
///
/// - `Ok(Some(value))`: the validated value
/// - `Ok(None)`: the variable is absent and that is acceptable; no key is emitted
/// - `Err(reasons)`: a non-empty list of failure reasons
pub type Outcome = Result<Option<Value>, Vec<String>>;

/// Message reported when a required variable is absent.
pub const REQUIRED: &str = "Required";

/// Validates the raw value of one environment variable.
pub trait Validator: Send + Sync {
    fn validate(&self, raw: Option<&str>) -> Outcome;
}

impl<F> Validator for F
where
    F: Fn(Option<&str>) -> Outcome + Send + Sync,
{
    fn validate(&self, raw: Option<&str>) -> Outcome {
        self(raw)
    }
}

/// Combinators available on every validator.
pub trait ValidatorExt: Validator + Sized {
    /// Accept an absent variable; present values still go through `self`.
    fn optional(self) -> Optional<Self> {
        Optional(self)
    }

    /// Validate `raw` in place of an absent variable.
    fn default_raw(self, raw: impl Into<String>) -> WithDefault<Self> {
        WithDefault {
            inner: self,
            raw: raw.into(),
        }
    }

    fn boxed(self) -> Box<dyn Validator>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<V: Validator> ValidatorExt for V {}

/// See [`ValidatorExt::optional`].
#[derive(Debug, Clone)]
pub struct Optional<V>(V);

impl<V: Validator> Validator for Optional<V> {
    fn validate(&self, raw: Option<&str>) -> Outcome {
        match raw {
            None => Ok(None),
            Some(_) => self.0.validate(raw),
        }
    }
}

/// See [`ValidatorExt::default_raw`].
#[derive(Debug, Clone)]
pub struct WithDefault<V> {
    inner: V,
    raw: String,
}

impl<V: Validator> Validator for WithDefault<V> {
    fn validate(&self, raw: Option<&str>) -> Outcome {
        self.inner.validate(Some(raw.unwrap_or(&self.raw)))
    }
}

/// String validator with chainable checks.
///
/// Every failing check is reported, in declaration order of the checks
/// below (length, url, patterns, allowed values).
#[derive(Debug, Clone, Default)]
pub struct Str {
    min: Option<usize>,
    max: Option<usize>,
    url: bool,
    patterns: Vec<(Regex, String)>,
    one_of: Option<Vec<String>>,
}

/// Any string.
pub fn string() -> Str {
    Str::default()
}

/// A string of at least one character.
pub fn non_empty() -> Str {
    Str::default().min(1)
}

/// An absolute URL.
pub fn url() -> Str {
    Str::default().url()
}

/// One of a fixed set of strings.
pub fn enumeration<I, S>(values: I) -> Str
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Str::default().one_of(values)
}

impl Str {
    /// Require at least `n` characters.
    pub fn min(mut self, n: usize) -> Self {
        self.min = Some(n);
        self
    }

    /// Allow at most `n` characters.
    pub fn max(mut self, n: usize) -> Self {
        self.max = Some(n);
        self
    }

    /// Require a parseable absolute URL.
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    /// Require a match of `pattern`, reporting `message` otherwise.
    pub fn matches(mut self, pattern: Regex, message: impl Into<String>) -> Self {
        self.patterns.push((pattern, message.into()));
        self
    }

    /// Restrict the value to a fixed set.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn check(&self, value: &str) -> Vec<String> {
        let mut reasons = Vec::new();
        let len = value.chars().count();

        if let Some(min) = self.min {
            if len < min {
                reasons.push(format!(
                    "String must contain at least {min} character(s)"
                ));
            }
        }
        if let Some(max) = self.max {
            if len > max {
                reasons.push(format!("String must contain at most {max} character(s)"));
            }
        }
        if self.url && url::Url::parse(value).is_err() {
            reasons.push("Invalid url".to_string());
        }
        for (pattern, message) in &self.patterns {
            if !pattern.is_match(value) {
                reasons.push(message.clone());
            }
        }
        if let Some(allowed) = &self.one_of {
            if !allowed.iter().any(|a| a == value) {
                reasons.push(format!(
                    "Invalid enum value. Expected {}",
                    allowed
                        .iter()
                        .map(|a| format!("'{a}'"))
                        .collect::<Vec<_>>()
                        .join(" | ")
                ));
            }
        }

        reasons
    }
}

impl Validator for Str {
    fn validate(&self, raw: Option<&str>) -> Outcome {
        let value = raw.ok_or_else(|| vec![REQUIRED.to_string()])?;
        let reasons = self.check(value);
        if reasons.is_empty() {
            Ok(Some(Value::String(value.to_string())))
        } else {
            Err(reasons)
        }
    }
}

/// Validator that parses the raw value with `FromStr`.
///
/// The parsed value is stored as its JSON representation, so numbers stay
/// numbers and booleans stay booleans in the result object.
pub struct Parse<T> {
    _marker: PhantomData<fn() -> T>,
}

/// Parse the raw value into `T`.
pub fn parse<T>() -> Parse<T>
where
    T: FromStr + Serialize,
    T::Err: fmt::Display,
{
    Parse {
        _marker: PhantomData,
    }
}

impl<T> fmt::Debug for Parse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parse")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T> Clone for Parse<T> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Validator for Parse<T>
where
    T: FromStr + Serialize,
    T::Err: fmt::Display,
{
    fn validate(&self, raw: Option<&str>) -> Outcome {
        let value = raw.ok_or_else(|| vec![REQUIRED.to_string()])?;
        let parsed = value
            .parse::<T>()
            .map_err(|e| vec![format!("Expected {}: {e}", std::any::type_name::<T>())])?;
        match serde_json::to_value(&parsed) {
            // serde_json stores NaN and infinities as null
            Ok(Value::Null) => Err(vec![format!(
                "Expected {}: value must be finite",
                std::any::type_name::<T>()
            )]),
            Ok(value) => Ok(Some(value)),
            Err(e) => Err(vec![e.to_string()]),
        }
    }
}

/// Lenient boolean: `true/false`, `1/0`, `yes/no`, `on/off`, any case.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

pub fn boolean() -> Boolean {
    Boolean
}

impl Validator for Boolean {
    fn validate(&self, raw: Option<&str>) -> Outcome {
        let value = raw.ok_or_else(|| vec![REQUIRED.to_string()])?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(Value::Bool(true))),
            "false" | "0" | "no" | "off" => Ok(Some(Value::Bool(false))),
            _ => Err(vec!["Expected a boolean".to_string()]),
        }
    }
}
