//! Notification action dispatcher
//!
//! Handles the buttons of the incoming-call notification. Call handling goes
//! to the external call-state collaborator; the accept-and-play action also
//! starts the hold-notification clip.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::call::CallAction;
use crate::domain::error::InvalidActionError;

use super::playback::PlaybackController;
use super::ports::CallControl;

/// Stateless router from notification actions to call control and playback
pub struct NotificationActionDispatcher {
    calls: Arc<dyn CallControl>,
}

impl NotificationActionDispatcher {
    pub fn new(calls: Arc<dyn CallControl>) -> Self {
        Self { calls }
    }

    /// Handle one action.
    ///
    /// For accept-and-play the call is accepted before playback starts, and
    /// whatever happens to playback afterwards never reaches call handling.
    pub fn dispatch(&self, action: CallAction, player: &mut PlaybackController) {
        info!("Handling notification action {}", action);
        match action {
            CallAction::Accept => {
                self.calls.show_call_screen();
                self.calls.accept();
            }
            CallAction::Decline => self.calls.reject(),
            CallAction::AcceptAndPlay => {
                self.calls.accept();
                player.play(|end| debug!("Hold notification playback ended: {}", end));
            }
        }
    }

    /// Parse an action identifier and handle it
    pub fn dispatch_identifier(
        &self,
        identifier: &str,
        player: &mut PlaybackController,
    ) -> Result<CallAction, InvalidActionError> {
        let action: CallAction = identifier.parse()?;
        self.dispatch(action, player);
        Ok(action)
    }
}
