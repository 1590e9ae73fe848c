//! Example demonstrating a shared prefix

use envshape::{create_env, validate, EnvOptions, Schema};

fn main() -> anyhow::Result<()> {
    // Set environment variables with prefix
    std::env::set_var("NEXT_PUBLIC_API_URL", "https://api.example.com");
    std::env::set_var("NEXT_PUBLIC_PORT", "3000");

    let schema = Schema::new()
        .var("API_URL", validate::url())?
        .var("PORT", validate::parse::<u16>())?;

    let env = create_env(schema, EnvOptions::new().prefix("NEXT_PUBLIC"))?;

    println!("Configuration with prefix 'NEXT_PUBLIC':");
    for (key, value) in &env {
        println!("  {key} = {value}");
    }

    Ok(())
}
