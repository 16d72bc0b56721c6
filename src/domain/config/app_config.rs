//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// External call-control commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallConfig {
    pub accept_command: Option<String>,
    pub reject_command: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage_dir: Option<String>,
    pub notify: Option<bool>,
    pub call: Option<CallConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            storage_dir: None,
            notify: Some(false),
            call: Some(CallConfig::default()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            storage_dir: other.storage_dir.or(self.storage_dir),
            notify: other.notify.or(self.notify),
            call: Self::merge_call_config(self.call, other.call),
        }
    }

    fn merge_call_config(base: Option<CallConfig>, other: Option<CallConfig>) -> Option<CallConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(CallConfig {
                accept_command: o.accept_command.or(b.accept_command),
                reject_command: o.reject_command.or(b.reject_command),
            }),
        }
    }

    /// Storage root for the clip, or the platform data directory
    pub fn storage_dir_or_default(&self) -> PathBuf {
        self.storage_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_dir)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    pub fn accept_command(&self) -> Option<&str> {
        self.call.as_ref().and_then(|c| c.accept_command.as_deref())
    }

    pub fn reject_command(&self) -> Option<&str> {
        self.call.as_ref().and_then(|c| c.reject_command.as_deref())
    }
}

/// App-private data directory (`$XDG_DATA_HOME/hold-notice` on Linux)
pub fn default_storage_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hold-notice")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.storage_dir.is_none());
        assert_eq!(config.notify, Some(false));
        assert!(config.accept_command().is_none());
        assert!(config.reject_command().is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.storage_dir.is_none());
        assert!(config.notify.is_none());
        assert!(config.call.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            storage_dir: Some("/base".to_string()),
            notify: Some(true),
            ..Default::default()
        };
        let other = AppConfig {
            storage_dir: Some("/other".to_string()),
            notify: None,
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.storage_dir, Some("/other".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_call_config_per_field() {
        let base = AppConfig {
            call: Some(CallConfig {
                accept_command: Some("answer".to_string()),
                reject_command: Some("hangup".to_string()),
            }),
            ..Default::default()
        };
        let other = AppConfig {
            call: Some(CallConfig {
                accept_command: Some("pickup".to_string()),
                reject_command: None,
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.accept_command(), Some("pickup"));
        assert_eq!(merged.reject_command(), Some("hangup"));
    }

    #[test]
    fn storage_dir_uses_configured_path() {
        let config = AppConfig {
            storage_dir: Some("/tmp/hold".to_string()),
            ..Default::default()
        };
        assert_eq!(config.storage_dir_or_default(), PathBuf::from("/tmp/hold"));
    }

    #[test]
    fn storage_dir_default_is_app_private() {
        let config = AppConfig::empty();
        assert!(config
            .storage_dir_or_default()
            .to_string_lossy()
            .contains("hold-notice"));
    }

    #[test]
    fn notify_defaults_to_false() {
        assert!(!AppConfig::empty().notify_or_default());
    }
}
