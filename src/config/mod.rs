//! Configuration module for the storefront gateway

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// SunCar backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// Base URL of the backend API. Empty means unconfigured: every handler
    /// that needs the backend fails closed with a 500.
    #[serde(default)]
    pub url: String,
    /// Static bearer token attached to backend calls
    #[serde(default = "default_token")]
    pub token: String,
    /// Request timeout for outbound calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Recommender base URL; falls back to `url` when empty
    #[serde(default)]
    pub recommender_url: String,
}

fn default_token() -> String {
    "suncar-token-2025".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl BackendSettings {
    /// Base URL the recommender calls should use
    pub fn recommender_base(&self) -> &str {
        if self.recommender_url.is_empty() {
            &self.url
        } else {
            &self.recommender_url
        }
    }
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with SUNCAR_)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            .add_source(
                Environment::with_prefix("SUNCAR")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8080,
                workers: None,
            },
            backend: BackendSettings {
                url: String::new(),
                token: default_token(),
                timeout_secs: default_timeout_secs(),
                recommender_url: String::new(),
            },
        }
    }
}
