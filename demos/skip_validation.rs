//! Example showing the `skip_validation` escape hatch
//!
//! Useful where the full runtime environment is not available, e.g. while
//! building an image: values come back as raw strings, or `null` if unset.

use envshape::{create_env, validate, EnvOptions, Schema};

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_PORT", "not-a-port");

    let schema = Schema::new()
        .var("PORT", validate::parse::<u16>())?
        .var("DATABASE_URL", validate::url())?;

    let env = create_env(schema, EnvOptions::new().prefix("APP").skip_validation(true))?;

    println!("Raw configuration:");
    println!("  {}", serde_json::to_string_pretty(&env)?);

    Ok(())
}
