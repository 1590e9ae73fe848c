//! Example demonstrating per-variable prefix opt-out

use envshape::{validate, EnvOptions, Loader, Schema};

fn main() -> anyhow::Result<()> {
    std::env::set_var("NEXT_PUBLIC_API_URL", "https://api.example.com");
    std::env::set_var("NEXT_PUBLIC_PORT", "3000");
    // Server-side secret, read without the prefix
    std::env::set_var("API_KEY", "secret-key-123");

    let schema = Schema::new()
        .var("API_URL", validate::url())?
        .var("API_KEY", validate::non_empty())?
        .var("PORT", validate::parse::<u16>())?;

    let options = EnvOptions::new()
        .prefix("NEXT_PUBLIC")
        .disable_prefix(["API_KEY"]);

    let loader = Loader::new(schema, options)?;
    println!("Output keys: {:?}", loader.output_keys());

    let env = loader.load()?;
    println!("  NEXT_PUBLIC_API_URL = {:?}", env.get_str("NEXT_PUBLIC_API_URL"));
    println!("  NEXT_PUBLIC_PORT = {}", env.get_as::<u16>("NEXT_PUBLIC_PORT")?);
    println!("  API_KEY = {:?}", env.get_str("API_KEY"));

    Ok(())
}
