//! Interactive recording dialog driven from the terminal

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::{
    DialogUpdate, EventLoop, RecordingController, RecordingDialogCoordinator,
};
use crate::domain::config::AppConfig;
use crate::infrastructure::{create_notifier, CpalCaptureDevice, InputDevicePermission};

use super::app::{asset_store, playback_controller, send_notice, EXIT_ERROR, EXIT_SUCCESS};
use super::presenter::{Presenter, DIALOG_KEYS};
use super::signals::InterruptSignal;

/// One line typed into the dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    Record,
    Play,
    Delete,
    Ok,
    Cancel,
}

impl DialogKey {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "r" | "record" | "stop" => Some(Self::Record),
            "p" | "play" => Some(Self::Play),
            "d" | "delete" => Some(Self::Delete),
            "o" | "ok" => Some(Self::Ok),
            "q" | "cancel" | "quit" => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// `record`: run the dialog until it is confirmed, cancelled or interrupted
pub async fn run_record_dialog(config: &AppConfig) -> ExitCode {
    let mut presenter = Presenter::new();
    let notifier = create_notifier(config.notify_or_default());
    let mut interrupts = match InterruptSignal::new() {
        Ok(signal) => signal,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let store = asset_store(config);
    let mut event_loop = EventLoop::new();
    let permission = Arc::new(InputDevicePermission::new());
    let recorder = RecordingController::new(
        Box::new(CpalCaptureDevice::new()),
        permission.clone(),
        store.clone(),
        event_loop.sink(),
    );
    let player = playback_controller(Arc::clone(&store), event_loop.sink());
    let (mut dialog, mut updates) = RecordingDialogCoordinator::new(
        recorder,
        player,
        permission,
        store,
        event_loop.sink(),
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            Some(update) = updates.recv() => match update {
                DialogUpdate::Render(state) => presenter.render_dialog(&state),
                DialogUpdate::Notice(notice) => {
                    presenter.info(&notice.message());
                    send_notice(notifier.as_ref(), &notice).await;
                }
                DialogUpdate::Confirmed => presenter.success("Hold notification saved"),
                DialogUpdate::Closed => break,
            },
            Some(event) = event_loop.next() => dialog.handle_event(event),
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) => match DialogKey::parse(&line) {
                    Some(DialogKey::Record) => dialog.on_record_toggle(),
                    Some(DialogKey::Play) => dialog.on_play(),
                    Some(DialogKey::Delete) => dialog.on_delete(),
                    Some(DialogKey::Ok) => dialog.confirm(),
                    Some(DialogKey::Cancel) => dialog.cancel(),
                    None if line.trim().is_empty() => {}
                    None => presenter.warn(&format!("Unknown key. {}", DIALOG_KEYS)),
                },
                Ok(None) => {
                    debug!("stdin closed, cancelling dialog");
                    stdin_open = false;
                    dialog.cancel();
                }
                Err(e) => {
                    presenter.error(&format!("Failed to read input: {}", e));
                    stdin_open = false;
                    dialog.cancel();
                }
            },
            Some(signal) = interrupts.recv() => {
                debug!("Received {:?}, closing dialog", signal);
                dialog.cancel();
            }
        }
    }

    presenter.stop_spinner();
    ExitCode::from(EXIT_SUCCESS)
}
