//! Integration tests

use envshape::validate::{self, ValidatorExt};
use envshape::{create_env, EnvError, EnvOptions, Loader, Regex, Schema};
use serde_json::{json, Value};
use serial_test::serial;
use std::io;
use std::sync::{Arc, Mutex};

fn api_schema() -> Schema {
    Schema::new()
        .var("API_URL", validate::url())
        .unwrap()
        .var(
            "PORT",
            validate::string().matches(Regex::new(r"^\d+$").unwrap(), "PORT must be a number"),
        )
        .unwrap()
}

fn api_key_schema() -> Schema {
    api_schema()
        .var("API_KEY", validate::non_empty())
        .unwrap()
}

#[test]
#[serial]
fn test_parse_valid_environment_variables() {
    temp_env::with_vars(
        [("API_URL", Some("https://api.example.com")), ("PORT", Some("3000"))],
        || {
            let env = create_env(api_schema(), EnvOptions::new()).unwrap();
            assert_eq!(env.len(), 2);
            assert_eq!(env.get_str("API_URL"), Some("https://api.example.com"));
            assert_eq!(env.get_str("PORT"), Some("3000"));
        },
    );
}

#[test]
#[serial]
fn test_invalid_environment_variables_fail_together() {
    temp_env::with_vars(
        [("API_URL", Some("not-a-url")), ("PORT", Some("abc"))],
        || {
            let err = create_env(api_schema(), EnvOptions::new()).unwrap_err();
            let errors = err.validation_errors().expect("validation error");
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get("API_URL"), Some(&["Invalid url".to_string()][..]));
            assert_eq!(
                errors.get("PORT"),
                Some(&["PORT must be a number".to_string()][..])
            );
            assert!(err.to_string().starts_with("Invalid environment variables"));
        },
    );
}

#[test]
#[serial]
fn test_prefix_applied_uniformly() {
    temp_env::with_vars(
        [
            ("NEXT_PUBLIC_API_URL", Some("https://api.example.com")),
            ("NEXT_PUBLIC_PORT", Some("3000")),
            ("API_URL", None),
            ("PORT", None),
        ],
        || {
            let env = create_env(api_schema(), EnvOptions::new().prefix("NEXT_PUBLIC")).unwrap();
            let keys: Vec<&str> = env.keys().collect();
            assert_eq!(keys, vec!["NEXT_PUBLIC_API_URL", "NEXT_PUBLIC_PORT"]);
            assert_eq!(env.get_str("NEXT_PUBLIC_API_URL"), Some("https://api.example.com"));
            assert_eq!(env.get_str("NEXT_PUBLIC_PORT"), Some("3000"));
        },
    );
}

#[test]
#[serial]
fn test_selective_disable_prefix() {
    temp_env::with_vars(
        [
            ("NEXT_PUBLIC_API_URL", Some("https://api.example.com")),
            ("NEXT_PUBLIC_PORT", Some("3000")),
            ("API_KEY", Some("secret")),
            ("NEXT_PUBLIC_API_KEY", Some("wrong")),
        ],
        || {
            let options = EnvOptions::new()
                .prefix("NEXT_PUBLIC")
                .disable_prefix(["API_KEY"]);
            let env = create_env(api_key_schema(), options).unwrap();

            assert_eq!(env.get_str("API_KEY"), Some("secret"));
            assert!(!env.contains_key("NEXT_PUBLIC_API_KEY"));
            assert_eq!(env.get_str("NEXT_PUBLIC_API_URL"), Some("https://api.example.com"));
            assert_eq!(env.get_str("NEXT_PUBLIC_PORT"), Some("3000"));
        },
    );
}

#[test]
#[serial]
fn test_failure_keys_are_output_keys() {
    temp_env::with_vars(
        [
            ("NEXT_PUBLIC_API_URL", Some("nope")),
            ("NEXT_PUBLIC_PORT", Some("3000")),
            ("API_KEY", None),
        ],
        || {
            let options = EnvOptions::new()
                .prefix("NEXT_PUBLIC")
                .disable_prefix(["API_KEY"]);
            let err = create_env(api_key_schema(), options).unwrap_err();
            let errors = err.validation_errors().unwrap();
            let keys: Vec<&String> = errors.fields().keys().collect();
            assert_eq!(keys, vec!["API_KEY", "NEXT_PUBLIC_API_URL"]);
            assert_eq!(errors.get("API_KEY"), Some(&["Required".to_string()][..]));
        },
    );
}

#[test]
#[serial]
fn test_skip_validation_returns_raw_strings() {
    temp_env::with_vars(
        [("APP_API_URL", Some("not-a-url")), ("APP_PORT", Some("abc"))],
        || {
            let options = EnvOptions::new().prefix("APP").skip_validation(true);
            let env = create_env(api_schema(), options).unwrap();
            assert_eq!(env.get("APP_API_URL"), Some(&json!("not-a-url")));
            assert_eq!(env.get("APP_PORT"), Some(&json!("abc")));
        },
    );
}

#[test]
#[serial]
fn test_skip_validation_does_not_coerce() {
    temp_env::with_vars([("PORT", Some("3000")), ("API_URL", None)], || {
        let schema = Schema::new()
            .var("PORT", validate::parse::<u16>())
            .unwrap()
            .var("API_URL", validate::url())
            .unwrap();
        let env = create_env(schema, EnvOptions::new().skip_validation(true)).unwrap();
        assert_eq!(env.get("PORT"), Some(&json!("3000")));
        assert_eq!(env.get("API_URL"), Some(&Value::Null));
    });
}

#[test]
#[serial]
fn test_empty_string_as_undefined() {
    temp_env::with_vars([("API_URL", Some("")), ("PORT", Some("3000"))], || {
        let schema = Schema::new()
            .var("API_URL", validate::string().optional())
            .unwrap()
            .var("PORT", validate::parse::<u16>())
            .unwrap();
        let env = create_env(schema, EnvOptions::new().empty_string_as_undefined(true)).unwrap();
        assert_eq!(env.get("API_URL"), None);
        assert_eq!(env.get_as::<u16>("PORT").unwrap(), 3000);
    });
}

#[test]
#[serial]
fn test_empty_string_as_undefined_still_fails_required() {
    temp_env::with_vars([("API_URL", Some("")), ("PORT", Some("3000"))], || {
        let schema = Schema::new()
            .var("API_URL", validate::string())
            .unwrap()
            .var("PORT", validate::parse::<u16>())
            .unwrap();
        let err = create_env(schema, EnvOptions::new().empty_string_as_undefined(true)).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.get("API_URL"), Some(&["Required".to_string()][..]));
        assert!(!errors.contains_key("PORT"));
    });
}

#[test]
#[serial]
fn test_empty_string_kept_without_option() {
    temp_env::with_var("API_URL", Some(""), || {
        let schema = Schema::new().var("API_URL", validate::string()).unwrap();
        let env = create_env(schema, EnvOptions::new()).unwrap();
        assert_eq!(env.get_str("API_URL"), Some(""));
    });
}

#[test]
#[serial]
fn test_load_is_idempotent() {
    temp_env::with_vars(
        [("APP_API_URL", Some("https://api.example.com")), ("APP_PORT", Some("8080"))],
        || {
            let loader = Loader::new(api_schema(), EnvOptions::new().prefix("APP")).unwrap();
            let first = loader.load().unwrap();
            let second = loader.load().unwrap();
            assert_eq!(first, second);
        },
    );
}

#[test]
#[serial]
fn test_load_reads_environment_fresh_each_call() {
    let schema = Schema::new().var("PORT", validate::parse::<u16>()).unwrap();
    let loader = Loader::new(schema, EnvOptions::new()).unwrap();

    let first = temp_env::with_var("PORT", Some("1000"), || loader.load().unwrap());
    let second = temp_env::with_var("PORT", Some("2000"), || loader.load().unwrap());
    assert_eq!(first.get("PORT"), Some(&json!(1000)));
    assert_eq!(second.get("PORT"), Some(&json!(2000)));
}

#[test]
#[serial]
fn test_runtime_env_layered_over_process() {
    temp_env::with_vars(
        [("API_URL", Some("https://process.example.com")), ("PORT", Some("3000"))],
        || {
            let options = EnvOptions::new().runtime_env([("API_URL", "https://override.example.com")]);
            let env = create_env(api_schema(), options).unwrap();
            assert_eq!(env.get_str("API_URL"), Some("https://override.example.com"));
            assert_eq!(env.get_str("PORT"), Some("3000"));
        },
    );
}

#[test]
fn test_disable_prefix_outside_schema_rejected() {
    let options = EnvOptions::new()
        .prefix("NEXT_PUBLIC")
        .disable_prefix(["DATABASE_URL"]);
    let err = Loader::new(api_schema(), options).unwrap_err();
    assert!(matches!(err, EnvError::UnknownDisablePrefix { name } if name == "DATABASE_URL"));
}

#[test]
fn test_duplicate_disable_prefix_rejected() {
    let options = EnvOptions::new()
        .prefix("NEXT_PUBLIC")
        .disable_prefix(["API_URL", "PORT", "API_URL"]);
    let err = Loader::new(api_schema(), options).unwrap_err();
    assert!(matches!(err, EnvError::DuplicateDisablePrefix { name } if name == "API_URL"));
}

#[test]
fn test_prefixed_and_exempt_names_cannot_share_a_key() {
    let schema = Schema::new()
        .var("B", validate::parse::<u16>())
        .unwrap()
        .var("A_B", validate::string())
        .unwrap();
    let options = EnvOptions::new().prefix("A").disable_prefix(["A_B"]);
    let err = create_env(schema, options).unwrap_err();
    assert!(matches!(err, EnvError::DuplicateOutputKey { ref key, .. } if key == "A_B"));
    assert!(err.validation_errors().is_none());
}

#[test]
fn test_result_keeps_declaration_order() {
    let schema = Schema::new()
        .var("ZONE", validate::string())
        .unwrap()
        .var("API_URL", validate::url())
        .unwrap()
        .var("MAX", validate::parse::<u32>())
        .unwrap();
    let env = std::collections::HashMap::from([
        ("APP_ZONE".to_string(), "eu".to_string()),
        ("APP_API_URL".to_string(), "https://api.example.com".to_string()),
        ("APP_MAX".to_string(), "5".to_string()),
    ]);
    let loader = Loader::new(schema, EnvOptions::new().prefix("APP")).unwrap();
    let vars = loader.load_from(&env).unwrap();
    let keys: Vec<&str> = vars.keys().collect();
    assert_eq!(keys, loader.output_keys());
    assert_eq!(keys, vec!["APP_ZONE", "APP_API_URL", "APP_MAX"]);
}

#[test]
fn test_empty_schema_produces_empty_result() {
    let env = create_env(Schema::new(), EnvOptions::new().prefix("APP")).unwrap();
    assert!(env.is_empty());
}

/// Writer shared between the test and the subscriber.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
#[serial]
fn test_validation_failure_is_logged_once() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    temp_env::with_vars(
        [
            ("NEXT_PUBLIC_API_URL", Some("nope")),
            ("NEXT_PUBLIC_PORT", Some("abc")),
        ],
        || {
            tracing::subscriber::with_default(subscriber, || {
                let result = create_env(api_schema(), EnvOptions::new().prefix("NEXT_PUBLIC"));
                assert!(result.is_err());
            });
        },
    );

    let output = captured.contents();
    let error_lines: Vec<&str> = output.lines().filter(|l| l.contains("ERROR")).collect();
    assert_eq!(error_lines.len(), 1, "{output}");
    assert!(error_lines[0].contains("Invalid environment variables"));
    assert!(error_lines[0].contains("NEXT_PUBLIC_API_URL"));
    assert!(error_lines[0].contains("NEXT_PUBLIC_PORT"));
    assert!(!output.contains("nope"), "raw values must not be logged");
}

#[test]
#[serial]
fn test_success_logs_no_error() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();

    temp_env::with_vars(
        [("API_URL", Some("https://api.example.com")), ("PORT", Some("1"))],
        || {
            tracing::subscriber::with_default(subscriber, || {
                create_env(api_schema(), EnvOptions::new()).unwrap();
            });
        },
    );

    assert!(!captured.contents().contains("ERROR"));
}
