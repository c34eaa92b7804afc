//! Server configuration, read once at startup from environment variables.
//!
//! `DATABASE_URL` is required. Everything else has a default, and numeric
//! values that fail to parse fall back to that default.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MEDIA_DIR: &str = "./media";
const DEFAULT_MEDIA_MAX_BYTES: usize = 50 * 1024 * 1024;
const DEFAULT_DOCUMENT_FLUSH_INTERVAL_MS: u64 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    /// Directory uploaded media files are written to and served from.
    pub media_dir: PathBuf,
    /// Prefix for media URLs handed back to clients, without a trailing slash.
    /// Empty means root-relative URLs.
    pub media_base_url: String,
    pub media_max_bytes: usize,
    pub flush_interval_ms: u64,
}

impl ServerConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        Ok(Self::with_database_url(database_url))
    }

    /// Read every optional setting from the environment.
    #[must_use]
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        let media_dir = std::env::var("MEDIA_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_MEDIA_DIR), PathBuf::from);
        let media_base_url = std::env::var("MEDIA_BASE_URL").unwrap_or_default();
        Self {
            database_url: database_url.into(),
            port: env_parse("PORT", DEFAULT_PORT),
            media_dir,
            media_base_url: media_base_url.trim().trim_end_matches('/').to_owned(),
            media_max_bytes: env_parse("MEDIA_MAX_BYTES", DEFAULT_MEDIA_MAX_BYTES),
            flush_interval_ms: env_parse("DOCUMENT_FLUSH_INTERVAL_MS", DEFAULT_DOCUMENT_FLUSH_INTERVAL_MS),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
