//! Error types for environment variable validation

use std::collections::BTreeMap;
use std::fmt;

/// Errors that can occur when building a loader or loading environment variables.
///
/// A validating load fails only with [`EnvError::Validation`]. The other
/// variants are raised earlier, while the schema and options are assembled,
/// or by the shape check of `#[derive(EnvShape)]` structs.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// One or more declared variables failed validation.
    ///
    /// Carries every failing output key, never only the first one.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A `disable_prefix` entry names a variable that is not in the schema.
    #[error("Variable '{name}' in disable_prefix is not declared in the schema")]
    UnknownDisablePrefix {
        /// Logical name listed in `disable_prefix`
        name: String,
    },

    /// A `disable_prefix` entry is listed more than once.
    #[error("Variable '{name}' is listed more than once in disable_prefix")]
    DuplicateDisablePrefix {
        /// Logical name listed twice
        name: String,
    },

    /// Two declared variables resolve to the same output key.
    ///
    /// Happens when a prefixed name collides with an exempt one, e.g. `B`
    /// under prefix `A` and an exempt `A_B`.
    #[error("Variables {names:?} all map to the output key '{key}'")]
    DuplicateOutputKey {
        /// The shared output key
        key: String,
        /// Logical names that resolve to `key`, in schema order
        names: Vec<String>,
    },

    /// A logical name was declared twice in one schema.
    ///
    /// Occurs on [`Schema::var`](crate::Schema::var) and when merging a preset
    /// that overlaps the caller's own declarations.
    #[error("Variable '{name}' is declared more than once in the schema")]
    DuplicateVar {
        /// Logical name declared twice
        name: String,
    },

    /// A validated value does not fit the shape a typed consumer declared.
    ///
    /// Raised by [`EnvVars::get_as`](crate::EnvVars::get_as) and by the
    /// code generated for `#[derive(EnvShape)]`.
    #[error("Environment variable '{key}' does not match the declared shape: {message}")]
    Shape {
        /// Output key of the offending value
        key: String,
        /// Why the value could not be used
        message: String,
    },
}

impl EnvError {
    /// Create a shape error (used by macro-generated code)
    #[doc(hidden)]
    pub fn shape(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Shape {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Per-key failure reasons when this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Failure reasons of a validating load, keyed by output key.
///
/// Each entry holds a non-empty ordered list of human-readable reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub(crate) fn from_fields(fields: BTreeMap<String, Vec<String>>) -> Self {
        Self { fields }
    }

    /// All failing output keys with their reasons.
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Reasons reported for one output key.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid environment variables")?;
        for (i, (key, reasons)) in self.fields.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{key}: {}", reasons.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
