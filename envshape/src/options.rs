//! Loader options

use std::collections::BTreeMap;

/// Options controlling how declared variables are looked up and reported.
///
/// ```rust
/// use envshape::EnvOptions;
///
/// let options = EnvOptions::new()
///     .prefix("NEXT_PUBLIC")
///     .disable_prefix(["API_KEY"])
///     .empty_string_as_undefined(true);
/// assert_eq!(options.output_key("API_URL"), "NEXT_PUBLIC_API_URL");
/// assert_eq!(options.output_key("API_KEY"), "API_KEY");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOptions {
    pub(crate) prefix: Option<String>,
    pub(crate) skip_validation: bool,
    pub(crate) disable_prefix: Vec<String>,
    pub(crate) empty_string_as_undefined: bool,
    pub(crate) runtime_env: BTreeMap<String, String>,
}

impl EnvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix joined with `_` to every variable not listed in `disable_prefix`.
    ///
    /// An empty prefix is the same as no prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// Return raw strings without running any validator.
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    /// Logical names exempt from prefixing, for lookup and for the result key.
    pub fn disable_prefix<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disable_prefix = names.into_iter().map(Into::into).collect();
        self
    }

    /// Treat variables set to the empty string as absent.
    pub fn empty_string_as_undefined(mut self, enabled: bool) -> Self {
        self.empty_string_as_undefined = enabled;
        self
    }

    /// Explicit values layered over the process environment.
    ///
    /// Keys are runtime keys, i.e. already prefixed where prefixing applies.
    /// Calling this again adds to the map; later values win.
    pub fn runtime_env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.runtime_env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn get_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_skip_validation(&self) -> bool {
        self.skip_validation
    }

    pub fn disabled_prefixes(&self) -> &[String] {
        &self.disable_prefix
    }

    pub fn is_empty_string_as_undefined(&self) -> bool {
        self.empty_string_as_undefined
    }

    /// Key under which `name` is looked up and reported.
    ///
    /// `{prefix}_{name}` when a prefix is set and `name` is not exempt,
    /// otherwise `name` itself.
    pub fn output_key(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) if !self.disable_prefix.iter().any(|d| d == name) => {
                format!("{prefix}_{name}")
            }
            _ => name.to_string(),
        }
    }
}
