//! Basic example: validate a few variables without a prefix

use envshape::validate::{self, ValidatorExt};
use envshape::{create_env, EnvOptions, Schema};

fn main() -> anyhow::Result<()> {
    // Print the diagnostic emitted on validation failure
    tracing_subscriber::fmt::init();

    std::env::set_var("DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("PORT", "8080");

    let schema = Schema::new()
        .var("DATABASE_URL", validate::url())?
        .var("PORT", validate::parse::<u16>())?
        .var(
            "LOG_LEVEL",
            validate::enumeration(["debug", "info", "warn", "error"]).default_raw("info"),
        )?;

    let env = create_env(schema, EnvOptions::new())?;

    println!("Configuration:");
    println!("  Database URL: {:?}", env.get_str("DATABASE_URL"));
    println!("  Port: {}", env.get_as::<u16>("PORT")?);
    println!("  Log level: {:?}", env.get_str("LOG_LEVEL"));

    // Break a variable to see the error report
    std::env::set_var("PORT", "eighty");
    let schema = Schema::new()
        .var("DATABASE_URL", validate::url())?
        .var("PORT", validate::parse::<u16>())?;
    if let Err(e) = create_env(schema, EnvOptions::new()) {
        println!("Expected failure: {e}");
    }

    Ok(())
}
