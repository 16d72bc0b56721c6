//! Recording dialog coordinator
//!
//! UI-facing orchestrator for the "record hold notification" dialog. It owns
//! one recording controller and one playback controller, turns user intents
//! into controller calls and publishes what the UI should show.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::playback::PlaybackEnd;
use crate::domain::recording::Duration;

use super::events::{EventSink, LoopEvent};
use super::playback::PlaybackController;
use super::ports::{AssetStore, PermissionGate, RECORD_AUDIO_REQUEST_CODE};
use super::recording::{RecorderUpdate, RecordingController, RecordingError, RecordingOutcome};

/// Snapshot of everything the dialog renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderState {
    /// A clip file is present; delete and play are offered
    pub has_asset: bool,
    pub is_recording: bool,
    pub elapsed_seconds: u32,
}

impl RenderState {
    /// Elapsed recording time as `MM:SS`
    pub fn elapsed_clock(&self) -> String {
        Duration::from_secs(u64::from(self.elapsed_seconds)).to_string()
    }

    /// Label of the record toggle
    pub fn record_label(&self) -> &'static str {
        if self.is_recording {
            "Stop recording"
        } else {
            "Start recording"
        }
    }

    /// Status line under the buttons
    pub fn status_text(&self) -> &'static str {
        if self.is_recording {
            "Recording in progress"
        } else if self.has_asset {
            "Recording exists"
        } else {
            "No recording"
        }
    }

    /// Whether delete and play are offered
    pub fn shows_asset_actions(&self) -> bool {
        self.has_asset
    }
}

/// Short-lived message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RecordingSaved,
    RecordingFailed,
    FileDeleted,
    /// Playback was requested; carries the clip description
    Playing { description: String },
    PlaybackCompleted,
    PermissionRequired,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::RecordingSaved => "Recording saved".to_string(),
            Self::RecordingFailed => "Recording failed".to_string(),
            Self::FileDeleted => "File deleted".to_string(),
            Self::Playing { description } => format!("Playing audio...\n{}", description),
            Self::PlaybackCompleted => "Playback completed".to_string(),
            Self::PermissionRequired => RecordingError::PermissionDenied.to_string(),
        }
    }
}

/// Everything the coordinator publishes to the UI, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogUpdate {
    Render(RenderState),
    Notice(Notice),
    /// The OK button was pressed
    Confirmed,
    /// The dialog has been torn down; nothing follows
    Closed,
}

pub type DialogUpdates = mpsc::UnboundedReceiver<DialogUpdate>;

pub struct RecordingDialogCoordinator {
    recorder: RecordingController,
    player: PlaybackController,
    permission: Arc<dyn PermissionGate>,
    store: Arc<dyn AssetStore>,
    events: EventSink,
    updates: mpsc::UnboundedSender<DialogUpdate>,
    awaiting_permission: bool,
    closed: bool,
}

impl RecordingDialogCoordinator {
    /// Open the dialog. The initial render state is published immediately.
    pub fn new(
        recorder: RecordingController,
        player: PlaybackController,
        permission: Arc<dyn PermissionGate>,
        store: Arc<dyn AssetStore>,
        events: EventSink,
    ) -> (Self, DialogUpdates) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let coordinator = Self {
            recorder,
            player,
            permission,
            store,
            events,
            updates,
            awaiting_permission: false,
            closed: false,
        };
        coordinator.render();
        (coordinator, receiver)
    }

    /// Current render state
    pub fn render_state(&self) -> RenderState {
        RenderState {
            has_asset: self.store.exists(),
            is_recording: self.recorder.is_recording(),
            elapsed_seconds: self.recorder.elapsed_secs(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn recorder(&self) -> &RecordingController {
        &self.recorder
    }

    pub fn player(&self) -> &PlaybackController {
        &self.player
    }

    /// Record button: start when idle, stop when recording
    pub fn on_record_toggle(&mut self) {
        if self.closed {
            return;
        }
        if self.recorder.is_recording() {
            self.stop_recording();
        } else {
            self.start_recording(true);
        }
    }

    /// Answer to a permission request issued by this dialog
    pub fn on_permission_result(&mut self, request_code: u32, granted: bool) {
        if self.closed || request_code != RECORD_AUDIO_REQUEST_CODE || !self.awaiting_permission {
            debug!("Ignoring permission result for request {}", request_code);
            return;
        }
        self.awaiting_permission = false;

        if granted {
            self.start_recording(false);
        } else {
            self.notify(Notice::PermissionRequired);
        }
    }

    /// Delete button. Ignored while recording.
    pub fn on_delete(&mut self) {
        if self.closed || self.recorder.is_recording() {
            return;
        }
        if self.store.delete() {
            info!("Deleted hold notification audio");
            self.render();
            self.notify(Notice::FileDeleted);
        }
    }

    /// Play button: preview the stored clip
    pub fn on_play(&mut self) {
        if self.closed {
            return;
        }
        self.notify(Notice::Playing {
            description: self.store.describe().to_string(),
        });

        let updates = self.updates.clone();
        self.player.play(move |end| {
            if let PlaybackEnd::Failed(reason) = &end {
                warn!("Preview playback failed: {}", reason);
            }
            let _ = updates.send(DialogUpdate::Notice(Notice::PlaybackCompleted));
        });
    }

    /// Route one loop event to the controller it belongs to
    pub fn handle_event(&mut self, event: LoopEvent) {
        if self.closed {
            return;
        }
        match event {
            LoopEvent::Recorder(event) => match self.recorder.handle_event(event) {
                Some(RecorderUpdate::Tick { .. }) => self.render(),
                Some(RecorderUpdate::AutoStopped(result)) => self.recording_finished(result),
                None => {}
            },
            LoopEvent::Playback(event) => self.player.handle_event(event),
            LoopEvent::Permission {
                request_code,
                granted,
            } => self.on_permission_result(request_code, granted),
        }
    }

    /// OK button: report acceptance, then close
    pub fn confirm(&mut self) {
        if self.closed {
            return;
        }
        let _ = self.updates.send(DialogUpdate::Confirmed);
        self.teardown();
    }

    /// Dialog dismissed
    pub fn dismiss(&mut self) {
        self.teardown();
    }

    /// Cancel button or back
    pub fn cancel(&mut self) {
        self.teardown();
    }

    /// `may_request`: ask for permission when it is missing. False after a
    /// request was answered, so a gate that still refuses ends the flow.
    fn start_recording(&mut self, may_request: bool) {
        match self.recorder.start() {
            Ok(_elapsed) => self.render(),
            Err(RecordingError::PermissionDenied) if self.awaiting_permission => {
                debug!("Permission request already pending");
            }
            Err(RecordingError::PermissionDenied) if may_request => {
                debug!("Microphone permission missing, requesting it");
                self.awaiting_permission = true;
                self.permission.request(RECORD_AUDIO_REQUEST_CODE, &self.events);
            }
            Err(RecordingError::PermissionDenied) => {
                self.notify(Notice::PermissionRequired);
            }
            Err(e) => {
                warn!("Could not start recording: {}", e);
                self.player.stop();
                self.notify(Notice::RecordingFailed);
                self.render();
            }
        }
    }

    fn stop_recording(&mut self) {
        let result = self.recorder.stop();
        self.recording_finished(result);
    }

    fn recording_finished(&mut self, result: Result<RecordingOutcome, RecordingError>) {
        match result {
            Ok(outcome) => {
                info!(
                    "Recording saved ({}s, capped: {})",
                    outcome.elapsed_secs, outcome.duration_capped
                );
                self.render();
                self.notify(Notice::RecordingSaved);
            }
            Err(e) => {
                warn!("Recording failed: {}", e);
                self.player.stop();
                self.render();
                self.notify(Notice::RecordingFailed);
            }
        }
    }

    /// Stops an active recording, releases playback and closes. Runs once.
    fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.awaiting_permission = false;

        if let Some(outcome) = self.recorder.cancel() {
            debug!("Recording finalized on close ({}s)", outcome.elapsed_secs);
            self.notify(Notice::RecordingSaved);
        }
        self.player.stop();
        let _ = self.updates.send(DialogUpdate::Closed);
    }

    fn render(&self) {
        let _ = self.updates.send(DialogUpdate::Render(self.render_state()));
    }

    fn notify(&self, notice: Notice) {
        let _ = self.updates.send(DialogUpdate::Notice(notice));
    }
}

impl Drop for RecordingDialogCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
