//! Domain error types

use thiserror::Error;

/// Error when an unknown call action identifier is received
#[derive(Debug, Clone, Error)]
#[error("Invalid action: \"{input}\". Valid actions are: accept_call, decline_call, play_notification_and_accept")]
pub struct InvalidActionError {
    pub input: String,
}

/// Error when an unknown routing mode name is parsed
#[derive(Debug, Clone, Error)]
#[error("Invalid routing mode: \"{input}\". Valid modes are: normal, ringtone, in_call, in_communication")]
pub struct InvalidRoutingModeError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_action_lists_known_actions() {
        let err = InvalidActionError {
            input: "hang_up".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hang_up"));
        assert!(msg.contains("play_notification_and_accept"));
    }

    #[test]
    fn validation_error_names_key() {
        let err = ConfigError::ValidationError {
            key: "volume".to_string(),
            message: "out of range".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'volume': out of range"
        );
    }
}
