//! Config file under the platform config directory

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Points at a config file to use instead of the platform location
pub const CONFIG_PATH_ENV: &str = "HOLD_NOTICE_CONFIG";

const HEADER: &str = "# hold-notice\n# keys: storage_dir, notify, call.accept_command, call.reject_command\n\n";

/// `<config dir>/hold-notice/config.toml`, or `$HOLD_NOTICE_CONFIG`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(platform_path);
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn write(&self, content: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        fs::write(&self.path, content).await.map_err(write_error)
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn platform_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("hold-notice")
        .join("config.toml")
}

fn write_error(e: io::Error) -> ConfigError {
    ConfigError::WriteError(e.to_string())
}

fn render(config: &AppConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<AppConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No config file at {}", self.path.display());
                Ok(AppConfig::empty())
            }
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        self.write(&render(config)?).await
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(ConfigError::AlreadyExists(self.path.display().to_string()));
        }
        let body = render(&AppConfig::defaults())?;
        self.write(&format!("{}{}", HEADER, body)).await
    }
}
