//! Schema-validated environment variables with key prefixing
//!
//! `envshape` reads a declared set of environment variables, validates them
//! in one pass and returns a single object instead of scattered
//! `std::env::var` calls. Variables can share a prefix (declare `API_URL`,
//! read and report `NEXT_PUBLIC_API_URL`) while selected variables opt out
//! of it.
//!
//! # Features
//!
//! - **All-or-nothing**: a load either validates every variable or reports every failure
//! - **Prefixing**: one prefix for lookup and result keys, with per-variable opt-out
//! - **Declarative**: typed structs with `#[derive(EnvShape)]`
//! - **Validators**: strings, URLs, enums, patterns, anything `FromStr`, or your own closure
//! - **Presets**: schema fragments for Vercel, Netlify, Railway, Render and Fly.io
//! - **Escape hatch**: `skip_validation` returns the raw strings untouched
//!
//! # Example
//!
//! ```rust
//! use envshape::{validate, EnvOptions, Loader, Schema};
//! use std::collections::HashMap;
//!
//! # fn main() -> anyhow::Result<()> {
//! let schema = Schema::new()
//!     .var("API_URL", validate::url())?
//!     .var("API_KEY", validate::non_empty())?
//!     .var("PORT", validate::parse::<u16>())?;
//!
//! let options = EnvOptions::new()
//!     .prefix("NEXT_PUBLIC")
//!     .disable_prefix(["API_KEY"]);
//!
//! let env = HashMap::from([
//!     ("NEXT_PUBLIC_API_URL".to_string(), "https://api.example.com".to_string()),
//!     ("NEXT_PUBLIC_PORT".to_string(), "3000".to_string()),
//!     ("API_KEY".to_string(), "secret".to_string()),
//! ]);
//!
//! let vars = Loader::new(schema, options)?.load_from(&env)?;
//! assert_eq!(vars.get_str("NEXT_PUBLIC_API_URL"), Some("https://api.example.com"));
//! assert_eq!(vars.get_as::<u16>("NEXT_PUBLIC_PORT")?, 3000);
//! assert_eq!(vars.get_str("API_KEY"), Some("secret"));
//! # Ok(())
//! # }
//! ```
//!
//! # Derive
//!
//! ```rust
//! use envshape::EnvShape;
//!
//! #[derive(Debug, EnvShape)]
//! #[env(prefix = "NEXT_PUBLIC")]
//! struct PublicEnv {
//!     #[env(validate = "envshape::validate::url()")]
//!     pub api_url: String,
//!
//!     // Read from API_KEY, not NEXT_PUBLIC_API_KEY
//!     #[env(no_prefix)]
//!     pub api_key: String,
//!
//!     #[env(default = "3000")]
//!     pub port: u16,
//!
//!     pub sentry_dsn: Option<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! assert_eq!(
//!     PublicEnv::output_keys(),
//!     &["NEXT_PUBLIC_API_URL", "API_KEY", "NEXT_PUBLIC_PORT", "NEXT_PUBLIC_SENTRY_DSN"]
//! );
//! #     let env = std::collections::HashMap::from([
//! #         ("NEXT_PUBLIC_API_URL".to_string(), "https://api.example.com".to_string()),
//! #         ("API_KEY".to_string(), "secret".to_string()),
//! #     ]);
//! #     let config = PublicEnv::load_from(&env)?;
//! #     assert_eq!(config.port, 3000);
//! #     assert_eq!(config.sentry_dsn, None);
//! # Ok(())
//! # }
//! ```
//!
//! # Attributes
//!
//! ## `#[env(prefix = "PREFIX")]`
//!
//! Struct-level. Every field not marked `no_prefix` is read from and
//! reported as `{PREFIX}_{NAME}`.
//!
//! ## `#[env(no_prefix)]`
//!
//! Field-level. Exempt the field from the prefix.
//!
//! ## `#[env(validate = "expr")]`
//!
//! Field-level. Use the given validator instead of parsing the field type
//! with `FromStr`.
//!
//! ```rust
//! # use envshape::EnvShape;
//! #[derive(EnvShape)]
//! struct Config {
//!     #[env(validate = "envshape::validate::enumeration([\"development\", \"production\"])")]
//!     pub node_env: String,
//! }
//! ```
//!
//! ## `#[env(default = "raw")]`
//!
//! Field-level. Raw value validated when the variable is absent.
//!
//! ## `#[env(name = "CUSTOM_NAME")]`
//!
//! Field-level. Logical variable name different from the upper-cased field name.
//!
//! ## `#[env(empty_string_as_undefined)]`
//!
//! Struct-level. Variables set to the empty string count as absent.

#[doc(hidden)]
pub mod de;

mod error;
mod loader;
mod options;
pub mod presets;
mod schema;
mod shape;
mod source;
pub mod validate;
mod vars;

pub use envshape_derive::EnvShape;
pub use error::{EnvError, ValidationErrors};
pub use loader::{create_env, Loader};
pub use options::EnvOptions;
pub use schema::Schema;
pub use shape::EnvShape;
pub use source::{EnvSource, ProcessEnv, RuntimeEnv};
pub use vars::EnvVars;

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;

pub use regex::Regex;
