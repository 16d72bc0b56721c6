//! Audio routing mode value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidRoutingModeError;

/// Platform audio-output configuration, saved and restored around playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoutingMode {
    /// Regular media output
    #[default]
    Normal,
    /// Ringing an incoming call
    Ringtone,
    /// Telephony call in progress
    InCall,
    /// VoIP or other communication session
    InCommunication,
}

impl RoutingMode {
    /// Get the string identifier for this mode
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Ringtone => "ringtone",
            Self::InCall => "in_call",
            Self::InCommunication => "in_communication",
        }
    }
}

impl FromStr for RoutingMode {
    type Err = InvalidRoutingModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "ringtone" => Ok(Self::Ringtone),
            "in_call" => Ok(Self::InCall),
            "in_communication" => Ok(Self::InCommunication),
            _ => Err(InvalidRoutingModeError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RoutingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
