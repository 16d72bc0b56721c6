//! Configuration port interface

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for persisted settings
#[async_trait]
pub trait ConfigStore: Send + Sync {
    fn path(&self) -> &Path;

    /// Load the stored config. A missing file yields an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Write the config, creating parent directories as needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Write the default config. Fails if a file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
