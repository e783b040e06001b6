use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub weather_api_key: String,
    pub visualcrossing_base_url: String,
    pub visualcrossing_timeline_path: String,
    pub unit_group: String,
    pub lang: String,
    pub upstream_timeout_secs: u64,
    pub redis_host: Option<String>,
    pub redis_port: u16,
    pub redis_password: Option<String>,
    pub cache_ttl_secs: u64,
    pub cache_max_entries: u64,
    pub cors_origin: String,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            weather_api_key: env::var("WEATHER_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY not set"))?,
            visualcrossing_base_url: env::var("VISUALCROSSING_BASE_URL")
                .unwrap_or_else(|_| "https://weather.visualcrossing.com".to_string()),
            visualcrossing_timeline_path: env::var("VISUALCROSSING_TIMELINE_PATH")
                .unwrap_or_else(|_| "/VisualCrossingWebServices/rest/services/timeline".to_string()),
            unit_group: env::var("WEATHER_UNIT_GROUP").unwrap_or_else(|_| "metric".to_string()),
            lang: env::var("WEATHER_LANG").unwrap_or_else(|_| "pt".to_string()),
            upstream_timeout_secs: parse_var("UPSTREAM_TIMEOUT_SECS", 30)?,
            redis_host: non_empty_var("REDIS_HOST"),
            redis_port: parse_var("REDIS_PORT", 6379)?,
            redis_password: non_empty_var("REDIS_PASSWORD"),
            cache_ttl_secs: positive_var("CACHE_TTL_SECS", 3600)?,
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", 10_000)?,
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: parse_var("SERVER_PORT", 3000)?,
        })
    }

    /// Connection URL for the Redis backend, if one is configured.
    pub fn redis_url(&self) -> Option<String> {
        let host = self.redis_host.as_ref()?;
        let auth = match &self.redis_password {
            Some(password) => format!(":{}@", urlencoding::encode(password)),
            None => String::new(),
        };
        Some(format!("redis://{}{}:{}/", auth, host, self.redis_port))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

/// Redis rejects `SET EX 0`, so durations must be at least one second.
fn positive_var(name: &str, default: u64) -> anyhow::Result<u64> {
    match parse_var(name, default)? {
        0 => Err(anyhow::anyhow!("{} must be greater than zero", name)),
        value => Ok(value),
    }
}

#[cfg(test)]
pub(crate) fn test_config(base_url: &str) -> Config {
    Config {
        weather_api_key: "test-key".to_string(),
        visualcrossing_base_url: base_url.to_string(),
        visualcrossing_timeline_path: "/VisualCrossingWebServices/rest/services/timeline".to_string(),
        unit_group: "metric".to_string(),
        lang: "pt".to_string(),
        upstream_timeout_secs: 5,
        redis_host: None,
        redis_port: 6379,
        redis_password: None,
        cache_ttl_secs: 3600,
        cache_max_entries: 100,
        cors_origin: "http://localhost:5173".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 3000,
    }
}
