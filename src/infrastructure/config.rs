//! Configuration infrastructure
//!
//! Settings are plain serde structs with defaults, optionally overridden
//! by a JSON config file and a small set of environment variables. A
//! missing file means pure defaults; a present but unreadable file is an
//! error rather than a silent fallback.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Configuration defaults, kept in one place so `Default` impls and docs
/// cannot drift apart.
pub mod defaults {
    pub const SERVER_HOST: &str = "0.0.0.0";
    pub const SERVER_PORT: u16 = 8080;

    pub const POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
    pub const PAGE_LIMIT: u32 = 1500;
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;
    pub const MAX_CONCURRENT_REQUESTS: usize = 10;
    pub const MAX_REQUESTS_PER_SECOND: u32 = 20;

    pub const SYNC_INTERVAL_HOURS: u64 = 12;

    pub const DATABASE_URL: &str = "sqlite:data/pokesync.db";
    pub const DB_MAX_CONNECTIONS: u32 = 10;

    pub const LOG_LEVEL: &str = "info";
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pokeapi: PokeApiConfig,
    pub sync: SyncConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
        }
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PokeApiConfig {
    /// Base URL of the catalog service, without a trailing slash.
    pub base_url: String,

    /// Page size requested from the list endpoint per cycle.
    pub page_limit: u32,

    /// Per-request timeout for both listing and detail calls.
    pub request_timeout_seconds: u64,

    /// Bound on in-flight detail fetches during a cycle.
    pub max_concurrent_requests: usize,

    /// Outbound request rate cap.
    pub max_requests_per_second: u32,
}

impl Default for PokeApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::POKEAPI_BASE_URL.to_string(),
            page_limit: defaults::PAGE_LIMIT,
            request_timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_concurrent_requests: defaults::MAX_CONCURRENT_REQUESTS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Cadence of scheduled sync cycles.
    pub interval_hours: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval_hours: defaults::SYNC_INTERVAL_HOURS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_string(),
            max_connections: defaults::DB_MAX_CONNECTIONS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: String,

    /// Emit JSON formatted logs instead of the human-readable format.
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path` when given and present, then apply
    /// environment overrides (POKESYNC_BASE_URL, POKESYNC_DATABASE_URL,
    /// POKESYNC_PORT).
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                let config: Self = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?;
                info!("loaded configuration from {}", path.display());
                config
            }
            Some(path) => {
                info!(
                    "config file {} not found, using defaults",
                    path.display()
                );
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("POKESYNC_BASE_URL") {
            self.pokeapi.base_url = base_url;
        }
        if let Ok(database_url) = std::env::var("POKESYNC_DATABASE_URL") {
            self.database.url = database_url;
        }
        if let Ok(port) = std::env::var("POKESYNC_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("ignoring unparsable POKESYNC_PORT value '{port}'"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_deployment() {
        let config = AppConfig::default();

        assert_eq!(config.pokeapi.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.pokeapi.page_limit, 1500);
        assert_eq!(config.sync.interval_hours, 12);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn partial_config_file_keeps_defaults_for_the_rest() {
        let json = r#"{ "pokeapi": { "page_limit": 200 }, "sync": { "interval_hours": 1 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.pokeapi.page_limit, 200);
        assert_eq!(config.sync.interval_hours, 1);
        // Untouched sections fall back to defaults.
        assert_eq!(config.pokeapi.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.database.max_connections, 10);
    }

    #[tokio::test]
    async fn load_with_missing_file_uses_defaults() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/pokesync.json")))
            .await
            .unwrap();
        assert_eq!(config.pokeapi.page_limit, 1500);
    }
}
