//! Configuration port interface

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted recorder defaults
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration from storage.
    ///
    /// A missing file yields an empty config, not an error.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save configuration to storage, creating parent directories.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the default configuration.
    /// Fails with `AlreadyExists` if the file is already there.
    async fn init(&self) -> Result<(), ConfigError>;

    /// Load configuration, treating an unreadable or malformed file as empty
    async fn load_or_empty(&self) -> AppConfig {
        match self.load().await {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %self.path().display(), error = %e, "Ignoring unreadable config file");
                AppConfig::empty()
            }
        }
    }
}
