//! Call action value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidActionError;

/// Action identifier: answer the ringing call
pub const ACCEPT_CALL: &str = "accept_call";

/// Action identifier: reject the ringing call
pub const DECLINE_CALL: &str = "decline_call";

/// Action identifier: answer the call and play the hold notification
pub const PLAY_NOTIFICATION_AND_ACCEPT: &str = "play_notification_and_accept";

/// All actions the dispatcher is bound to
pub const ALL_ACTIONS: &[CallAction] = &[
    CallAction::Accept,
    CallAction::Decline,
    CallAction::AcceptAndPlay,
];

/// External call-notification actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallAction {
    Accept,
    Decline,
    AcceptAndPlay,
}

impl CallAction {
    /// Get the action identifier
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accept => ACCEPT_CALL,
            Self::Decline => DECLINE_CALL,
            Self::AcceptAndPlay => PLAY_NOTIFICATION_AND_ACCEPT,
        }
    }

    /// Whether this action answers the call
    pub const fn accepts(&self) -> bool {
        matches!(self, Self::Accept | Self::AcceptAndPlay)
    }
}

impl FromStr for CallAction {
    type Err = InvalidActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ACCEPT_CALL => Ok(Self::Accept),
            DECLINE_CALL => Ok(Self::Decline),
            PLAY_NOTIFICATION_AND_ACCEPT => Ok(Self::AcceptAndPlay),
            _ => Err(InvalidActionError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for CallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
