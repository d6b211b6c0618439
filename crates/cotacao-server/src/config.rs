//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! (`cotacao.toml`, or the path in `COTACAO_CONFIG`), then `COTACAO_*`
//! environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "cotacao.toml";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_PATH: &str = "./cotacao.db";
pub const DEFAULT_UPSTREAM_URL: &str = "https://economia.awesomeapi.com.br/json/USD-BRL";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 10;

/// Store deadlines below this are expected to expire on most inserts.
const TIGHT_STORE_TIMEOUT_MS: u64 = 50;

/// What the handler does with a fault that is not a deadline expiry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Log and terminate the process
    #[default]
    Abort,
    /// Log and answer 500
    Respond,
}

impl std::fmt::Display for FaultPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultPolicy::Abort => write!(f, "abort"),
            FaultPolicy::Respond => write!(f, "respond"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub database_path: String,
    pub upstream_url: String,
    pub fetch_timeout_ms: u64,
    pub store_timeout_ms: u64,
    pub fault_policy: FaultPolicy,
    pub max_connections: u32,
}

impl ServerConfig {
    /// Load from the default file location and the environment
    pub fn load() -> Result<Self> {
        let path =
            std::env::var("COTACAO_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load using `path` as the (optional) config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("upstream_url", DEFAULT_UPSTREAM_URL)?
            .set_default("fetch_timeout_ms", DEFAULT_FETCH_TIMEOUT_MS)?
            .set_default("store_timeout_ms", DEFAULT_STORE_TIMEOUT_MS)?
            .set_default("fault_policy", "abort")?
            .set_default("max_connections", 5)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("COTACAO").try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Invalid server configuration")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    pub fn store_timeout_is_tight(&self) -> bool {
        self.store_timeout_ms < TIGHT_STORE_TIMEOUT_MS
    }
}
