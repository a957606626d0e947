use serde::Deserialize;
use std::time::Duration;

/// Public endpoint of the free client-side reverse geocoding API.
pub const DEFAULT_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Outbound services
    pub geocode_url: String,
    pub cities_url: String,
    pub http_timeout_secs: u64,
    pub debug: bool,
}

impl Config {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            cities_url: "http://localhost:9000".to_string(),
            http_timeout_secs: 10,
            debug: false,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    let geocode_url = std::env::var("WORLDWISE_GEOCODE_URL")
        .unwrap_or_else(|_| DEFAULT_GEOCODE_URL.to_string());

    let cities_url = std::env::var("WORLDWISE_CITIES_URL")
        .unwrap_or_else(|_| "http://localhost:9000".to_string());

    let http_timeout_secs = std::env::var("WORLDWISE_HTTP_TIMEOUT_SECS")
        .unwrap_or_else(|_| "10".to_string())
        .parse()
        .unwrap_or(10);

    let debug = std::env::var("DEBUG").is_ok();

    Ok(Config {
        geocode_url,
        cities_url,
        http_timeout_secs,
        debug,
    })
}
