//! Typed access to validated variables

use crate::error::EnvError;
use crate::loader::Loader;
use crate::options::EnvOptions;
use crate::schema::Schema;
use crate::source::EnvSource;
use crate::vars::EnvVars;

/// A struct whose fields are declared environment variables.
///
/// Usually implemented with `#[derive(EnvShape)]`, which computes
/// [`EnvShape::output_keys`] at compile time from the prefix and the
/// `no_prefix` markers. [`EnvShape::from_vars`] is the runtime half of that
/// contract: every required field must find its output key in the validated
/// variables with a value of the field's type.
pub trait EnvShape: Sized {
    /// Declared variables, keyed by logical name.
    fn schema() -> Result<Schema, EnvError>;

    fn options() -> EnvOptions;

    /// Output key of every field, in declaration order.
    fn output_keys() -> &'static [&'static str];

    /// Build `Self` from already validated variables.
    fn from_vars(vars: &EnvVars) -> Result<Self, EnvError>;

    fn loader() -> Result<Loader, EnvError> {
        Loader::new(Self::schema()?, Self::options())
    }

    /// Validate `source` and build `Self`.
    fn load_from<S: EnvSource + ?Sized>(source: &S) -> Result<Self, EnvError> {
        let vars = Self::loader()?.load_from(source)?;
        Self::from_vars(&vars)
    }
}
