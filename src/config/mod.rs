//! Configuration loading and validation for the admin service.
//!
//! Uses serde_yaml to load YAML configuration files with support for
//! environment variable overrides for deployment-specific values.

mod affiliate;
mod app;
mod duration;
mod error;
mod server;
mod storage;

pub use affiliate::AffiliateConfig;
pub use app::AppConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use serde::Deserialize;
use std::{env, fs};

/// Root configuration structure for the admin service.
///
/// Required sections: app.
/// Optional sections: server, storage, affiliate (all fall back to defaults).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Location of the JSON documents.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Affiliate gateway defaults.
    #[serde(default)]
    pub affiliate: AffiliateConfig,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// First loads environment variables from `.env` file (if exists),
    /// then loads YAML config and applies overrides from environment variables:
    /// - `PORT` replaces `server.port`
    /// - `DATA_DIR` replaces `storage.data_dir`
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore error if not found)
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply overrides from environment variables.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(port) = env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("PORT is not a valid port: {}", port)))?;
        }

        if let Ok(dir) = env::var("DATA_DIR") {
            if !dir.trim().is_empty() {
                self.storage.data_dir = dir;
            }
        }

        Ok(())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be positive".into()));
        }

        if self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::Validation("storage.data_dir is required".into()));
        }

        if self.affiliate.default_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "affiliate.default_url must not be empty".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
