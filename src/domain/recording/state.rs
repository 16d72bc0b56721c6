//! Recording state

use std::fmt;

/// Recording controller states.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop, max duration)
///   RECORDING -> ERROR -> IDLE (finalize failure)
///
/// `Error` is only observable between a failed finalize and the reset
/// that immediately follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
    Error,
}

impl RecordingState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(RecordingState::default(), RecordingState::Idle);
    }

    #[test]
    fn state_display() {
        assert_eq!(RecordingState::Idle.to_string(), "idle");
        assert_eq!(RecordingState::Recording.to_string(), "recording");
        assert_eq!(RecordingState::Error.to_string(), "error");
    }
}
