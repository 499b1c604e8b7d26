use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;

pub const DEFAULT_CSE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config {
        api_key: get_env_or_default("GOOGLE_API_KEY", ""),
        search_engine_id: get_env_or_default("GOOGLE_CSE_ID", ""),
        endpoint: get_env_or_default("GOOGLE_CSE_ENDPOINT", DEFAULT_CSE_ENDPOINT),
        bind_addr: get_env_or_default("GFINDER_BIND", DEFAULT_BIND_ADDR),
    }
});

/// Runtime settings. Missing credentials are not rejected here; the search
/// API answers them with a 400/403 which surfaces as a normal failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub search_engine_id: String,
    pub endpoint: String,
    pub bind_addr: String,
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
