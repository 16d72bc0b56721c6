//! Duration value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Hard cap on a single hold-notification recording (30 seconds)
pub const MAX_RECORDING_MS: u64 = 30_000;

/// Hard cap as a value object
pub const MAX_RECORDING_DURATION: Duration = Duration::from_millis(MAX_RECORDING_MS);

/// Period of the elapsed-time tick while recording
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Value object representing a time duration.
/// Immutable; displayed as a `MM:SS` clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Duration {
    milliseconds: u64,
}

impl Duration {
    /// Create a Duration from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Duration from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Get duration in whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get duration in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }

    /// Whether this duration has reached the recording cap
    pub const fn reaches_cap(&self) -> bool {
        self.milliseconds >= MAX_RECORDING_MS
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        write!(f, "{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}
