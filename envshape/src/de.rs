//! Support functions for code generated by `#[derive(EnvShape)]`

use crate::error::EnvError;
use crate::validate::{self, Parse};
use crate::vars::EnvVars;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Validator used for fields without `#[env(validate = "...")]`
#[doc(hidden)]
pub fn default_validator<T>() -> Parse<T>
where
    T: FromStr + Serialize,
    T::Err: fmt::Display,
{
    validate::parse::<T>()
}

/// Read a required field from the validated variables
///
/// Fails with [`EnvError::Shape`] when the output key is missing or holds a
/// value of another type.
#[doc(hidden)]
pub fn extract_required<T: DeserializeOwned>(vars: &EnvVars, key: &str) -> Result<T, EnvError> {
    vars.get_as(key)
}

/// Read an `Option<T>` field; a missing key is `None`
#[doc(hidden)]
pub fn extract_optional<T: DeserializeOwned>(
    vars: &EnvVars,
    key: &str,
) -> Result<Option<T>, EnvError> {
    vars.get_opt_as(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Validator;
    use serde_json::json;

    fn vars() -> EnvVars {
        let serde_json::Value::Object(map) = json!({ "APP_PORT": 8080, "APP_NAME": "svc" }) else {
            unreachable!()
        };
        EnvVars::from_map(map)
    }

    #[test]
    fn test_extract_required_success() {
        let port: u16 = extract_required(&vars(), "APP_PORT").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_extract_required_missing() {
        let result: Result<String, _> = extract_required(&vars(), "APP_MISSING");
        assert!(matches!(result, Err(EnvError::Shape { .. })));
    }

    #[test]
    fn test_extract_required_wrong_type() {
        let result: Result<u16, _> = extract_required(&vars(), "APP_NAME");
        match result {
            Err(EnvError::Shape { key, .. }) => assert_eq!(key, "APP_NAME"),
            _ => panic!("Expected Shape error"),
        }
    }

    #[test]
    fn test_extract_optional_missing() {
        let result: Option<String> = extract_optional(&vars(), "APP_MISSING").unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_extract_optional_present() {
        let result: Option<String> = extract_optional(&vars(), "APP_NAME").unwrap();
        assert_eq!(result, Some("svc".to_string()));
    }

    #[test]
    fn test_default_validator_parses_field_type() {
        assert_eq!(
            default_validator::<bool>().validate(Some("true")),
            Ok(Some(json!(true)))
        );
        assert!(default_validator::<u8>().validate(Some("300")).is_err());
    }
}
