//! Desktop notifications via notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::dialog::Notice;
use crate::application::ports::{NotificationError, Notifier};

const APP_NAME: &str = "Hold Notice";
const SUMMARY: &str = "Hold notification";

/// How long a notice stays on screen
const NOTICE_TIMEOUT_MS: u32 = 3_000;

/// Freedesktop icon for a notice
fn icon_name(notice: &Notice) -> &'static str {
    match notice {
        Notice::RecordingSaved => "dialog-ok",
        Notice::RecordingFailed => "dialog-error",
        Notice::FileDeleted => "user-trash",
        Notice::Playing { .. } | Notice::PlaybackCompleted => "audio-speakers",
        Notice::PermissionRequired => "audio-input-microphone",
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotifyRustNotifier;

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn show(&self, notice: &Notice) -> Result<(), NotificationError> {
        let notification = Notification::new()
            .appname(APP_NAME)
            .summary(SUMMARY)
            .body(&notice.message())
            .icon(icon_name(notice))
            .timeout(Timeout::Milliseconds(NOTICE_TIMEOUT_MS))
            .finalize();

        // D-Bus round trip blocks
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(drop)
                .map_err(|e| NotificationError(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError(e.to_string()))?
    }
}
