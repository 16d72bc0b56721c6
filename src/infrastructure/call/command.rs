//! Call control through user-configured shell commands
//!
//! Commands are spawned and never awaited by the caller; their exit status
//! is only logged.

use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::application::ports::CallControl;
use crate::domain::config::AppConfig;

/// Call-control command errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallControlError {
    #[error("Failed to run '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    #[error("'{command}' exited with status: {status}")]
    Exited { command: String, status: String },
}

#[derive(Debug, Clone, Default)]
pub struct CommandCallControl {
    accept_command: Option<String>,
    reject_command: Option<String>,
}

impl CommandCallControl {
    pub fn new(accept_command: Option<String>, reject_command: Option<String>) -> Self {
        Self {
            accept_command,
            reject_command,
        }
    }

    /// Build from the `[call]` table of the config
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.accept_command().map(str::to_owned),
            config.reject_command().map(str::to_owned),
        )
    }

    fn run(&self, label: &str, command: Option<&str>) {
        let Some(command) = command else {
            info!("No {} command configured, skipping", label);
            return;
        };

        match spawn_shell(command) {
            Ok(mut child) => {
                debug!("Spawned {} command: {}", label, command);
                let command = command.to_owned();
                tokio::spawn(async move {
                    match child.wait().await {
                        Ok(status) if status.success() => {}
                        Ok(status) => warn!(
                            "{}",
                            CallControlError::Exited {
                                command,
                                status: status.to_string(),
                            }
                        ),
                        Err(e) => warn!("Failed to wait for '{}': {}", command, e),
                    }
                });
            }
            Err(e) => warn!("{}", e),
        }
    }
}

fn spawn_shell(command: &str) -> Result<tokio::process::Child, CallControlError> {
    Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| CallControlError::SpawnFailed {
            command: command.to_owned(),
            reason: e.to_string(),
        })
}

impl CallControl for CommandCallControl {
    fn accept(&self) {
        self.run("accept", self.accept_command.as_deref());
    }

    fn reject(&self) {
        self.run("reject", self.reject_command.as_deref());
    }
}
