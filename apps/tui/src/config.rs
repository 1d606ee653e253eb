use crate::cli::CliArgs;
use dotenv::dotenv;
use orbit_core::Config;

/// Loads `.env` and lets command line flags override it.
pub fn load_environment(args: &CliArgs) {
    // Load environment variables from .env file
    dotenv().ok();

    args.apply_env_overrides();
}

/// Reads the provider configuration from the environment.
pub fn init_app_config() -> Config {
    let config = Config::from_env();
    if config.weather_api_key.is_none() {
        tracing::warn!("ORBIT_WEATHER_API_KEY is not set; weather will be unavailable");
    }
    if config.news_api_key.is_none() {
        tracing::warn!("ORBIT_NEWS_API_KEY is not set; news will be unavailable");
    }
    if config.coordinates.is_none() {
        tracing::info!("no coordinates configured; weather needs --lat/--lon");
    }
    config
}
