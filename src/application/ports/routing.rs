//! Audio routing port interface

use thiserror::Error;

use crate::domain::playback::RoutingMode;

/// Routing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("Failed to change routing mode to {mode}: {reason}")]
    SetFailed { mode: RoutingMode, reason: String },
}

/// Port for the platform's global audio-output mode
pub trait AudioRouting: Send + Sync {
    /// Current routing mode
    fn mode(&self) -> RoutingMode;

    /// Switch the routing mode
    fn set_mode(&self, mode: RoutingMode) -> Result<(), RoutingError>;
}
