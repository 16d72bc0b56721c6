//! Playback states and terminal outcomes

use std::fmt;

/// Playback controller states.
///
/// State machine:
///   IDLE -> PREPARING (play)
///   PREPARING -> PLAYING (device prepared)
///   PLAYING -> IDLE (completed)
///   PREPARING | PLAYING -> ERROR -> IDLE (device failure)
///   any -> IDLE (stop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Preparing,
    Playing,
    Error,
}

impl PlaybackState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Playing => "playing",
            Self::Error => "error",
        }
    }

    /// Whether a device resource may be open in this state
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Preparing | Self::Playing)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a single `play()` request ended.
///
/// Handed to the completion callback. None of these are errors from the
/// caller's point of view; a missing clip simply means there is nothing to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// The clip played to the end
    Finished,
    /// The output device failed somewhere between open and completion
    Failed(String),
    /// No clip has been recorded
    MissingAsset,
    /// A clip file exists but holds no data
    EmptyAsset,
}

impl PlaybackEnd {
    /// Whether anything was actually played
    pub fn played(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for PlaybackEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => write!(f, "playback completed"),
            Self::Failed(reason) => write!(f, "playback failed: {}", reason),
            Self::MissingAsset => write!(f, "no recording to play"),
            Self::EmptyAsset => write!(f, "recording is empty"),
        }
    }
}
