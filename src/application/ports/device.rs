//! Errors shared by capture and playback devices

use thiserror::Error;

/// Device-level failures.
///
/// These never escape a controller: they are turned into a status value or a
/// completion callback after the device resource has been released.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
    #[error("No audio device available")]
    NoDevice,

    #[error("Failed to open device: {0}")]
    Open(String),

    #[error("Failed to prepare device: {0}")]
    Prepare(String),

    #[error("Failed to start device: {0}")]
    Start(String),

    #[error("Failed to stop device: {0}")]
    Stop(String),

    #[error("Audio file error: {0}")]
    Io(String),
}

impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
