//! Example showing typed configuration with `#[derive(EnvShape)]`

use envshape::EnvShape;

#[derive(Debug, EnvShape)]
#[env(prefix = "NEXT_PUBLIC", empty_string_as_undefined)]
struct Config {
    // NEXT_PUBLIC_API_URL
    #[env(validate = "envshape::validate::url()")]
    pub api_url: String,

    // API_KEY (no prefix)
    #[env(no_prefix)]
    pub api_key: String,

    // NEXT_PUBLIC_PORT, 3000 when unset
    #[env(default = "3000")]
    pub port: u16,

    // NEXT_PUBLIC_ENVIRONMENT
    #[env(
        name = "ENVIRONMENT",
        validate = "envshape::validate::enumeration([\"development\", \"preview\", \"production\"])"
    )]
    pub node_env: String,

    // NEXT_PUBLIC_ANALYTICS_ID, empty counts as unset
    pub analytics_id: Option<String>,
}

fn main() -> anyhow::Result<()> {
    std::env::set_var("NEXT_PUBLIC_API_URL", "https://api.example.com");
    std::env::set_var("API_KEY", "secret-key-123");
    std::env::set_var("NEXT_PUBLIC_ENVIRONMENT", "preview");
    std::env::set_var("NEXT_PUBLIC_ANALYTICS_ID", "");

    println!("Output keys: {:?}", Config::output_keys());

    let config = Config::from_env()?;

    println!("Typed configuration:");
    println!("  API URL: {}", config.api_url);
    println!("  API key: {}", config.api_key);
    println!("  Port: {}", config.port);
    println!("  Environment: {}", config.node_env);
    println!("  Analytics ID: {:?}", config.analytics_id);

    Ok(())
}
