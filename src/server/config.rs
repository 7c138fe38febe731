use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_MEDIA_ROOT: &str = "storage/public";
const DEFAULT_MEDIA_BASE_URL: &str = "/storage";
const DEFAULT_LISTING_CACHE_TTL_SECS: u64 = 900;

pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,

    /// Directory uploaded media is written to.
    pub media_root: String,
    /// Public URL prefix media paths are appended to.
    pub media_base_url: String,

    pub listing_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_address = env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BIND_ADDRESS".to_string(), e.to_string()))?;

        let listing_cache_ttl_secs = match std::env::var("LISTING_CACHE_TTL_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("LISTING_CACHE_TTL_SECS".to_string(), e.to_string())
            })?,
            Err(_) => DEFAULT_LISTING_CACHE_TTL_SECS,
        };

        Ok(Self {
            database_url,
            bind_address,
            media_root: env_or("MEDIA_ROOT", DEFAULT_MEDIA_ROOT),
            media_base_url: env_or("MEDIA_BASE_URL", DEFAULT_MEDIA_BASE_URL),
            listing_cache_ttl_secs,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
