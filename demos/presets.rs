//! Example merging a platform preset into an application schema

use envshape::{presets, validate, EnvOptions, Loader, Schema};

fn main() -> anyhow::Result<()> {
    std::env::set_var("APP_DATABASE_URL", "postgres://localhost/db");
    std::env::set_var("VERCEL_ENV", "preview");
    std::env::set_var("VERCEL_GIT_COMMIT_SHA", "0a1b2c3");

    // Platform variables keep their own names
    let platform = presets::vercel();
    let unprefixed: Vec<String> = platform.names().into_iter().map(String::from).collect();

    let schema = Schema::new()
        .var("DATABASE_URL", validate::url())?
        .merge(platform)?;

    let options = EnvOptions::new().prefix("APP").disable_prefix(unprefixed);
    let env = Loader::new(schema, options)?.load()?;

    println!("Application and platform configuration:");
    for (key, value) in &env {
        println!("  {key} = {value}");
    }

    Ok(())
}
