//! Snapshots of the ambient environment

use std::collections::{BTreeMap, HashMap};
use std::env;

/// Something that can produce a snapshot of string environment variables.
///
/// The loader calls [`EnvSource::snapshot`] once per load and never writes back.
pub trait EnvSource {
    fn snapshot(&self) -> RuntimeEnv;
}

/// The current process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn snapshot(&self) -> RuntimeEnv {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

impl EnvSource for HashMap<String, String> {
    fn snapshot(&self) -> RuntimeEnv {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn snapshot(&self) -> RuntimeEnv {
        RuntimeEnv {
            vars: self.clone(),
        }
    }
}

impl EnvSource for RuntimeEnv {
    fn snapshot(&self) -> RuntimeEnv {
        self.clone()
    }
}

/// Owned copy of string key/value pairs taken at the start of a load.
///
/// An absent key reads as "not present", never as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeEnv {
    vars: BTreeMap<String, String>,
}

impl RuntimeEnv {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Layer `overrides` on top of this snapshot; overriding values win.
    pub fn overlay<'a, I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (k, v) in overrides {
            self.vars.insert(k.clone(), v.clone());
        }
    }

    /// Forget every variable whose value is the empty string.
    pub fn drop_empty(&mut self) {
        self.vars.retain(|_, v| !v.is_empty());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<(String, String)> for RuntimeEnv {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
