//! Recording controller
//!
//! Owns the microphone capture resource for the single hold-notification clip.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info, warn};

use crate::domain::asset::AssetInfo;
use crate::domain::recording::{Duration, RecordingState, MAX_RECORDING_DURATION, TICK_INTERVAL};

use super::events::{EventSink, RecorderEvent, SessionToken};
use super::ports::{
    AssetStore, CaptureDevice, CaptureFormat, CaptureHandle, CaptureRequest, DeviceError,
    PermissionGate,
};

/// Recording errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingError {
    #[error("Audio recording permission is required")]
    PermissionDenied,

    #[error("Recording already in progress")]
    AlreadyRecording,

    #[error("No recording in progress")]
    NotRecording,

    #[error("Failed to start recording: {0}")]
    StartFailed(DeviceError),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(DeviceError),
}

impl RecordingError {
    /// Whether the capture device itself failed
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::StartFailed(_) | Self::FinalizeFailed(_))
    }
}

/// Receives the elapsed seconds of the running recording, one update per tick
pub type ElapsedStream = watch::Receiver<u32>;

/// Result of a finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOutcome {
    /// Whole seconds recorded according to the tick counter
    pub elapsed_secs: u32,
    /// Whether the recording was stopped by the duration cap
    pub duration_capped: bool,
    /// The clip as it sits on disk after finalizing
    pub asset: AssetInfo,
}

/// What a recorder event changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderUpdate {
    /// Another second elapsed
    Tick { elapsed_secs: u32 },
    /// The cap was reached and the recording was finalized
    AutoStopped(Result<RecordingOutcome, RecordingError>),
}

struct RecordingSession {
    token: SessionToken,
    handle: Box<dyn CaptureHandle>,
    elapsed_secs: u32,
    elapsed_tx: watch::Sender<u32>,
    ticker: JoinHandle<()>,
}

/// Drives one microphone capture at a time.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop, duration cap)
///   RECORDING -> ERROR -> IDLE (finalize failure)
///
/// A capture handle is held exactly while the state is `Recording`.
pub struct RecordingController {
    device: Box<dyn CaptureDevice>,
    permission: Arc<dyn PermissionGate>,
    store: Arc<dyn AssetStore>,
    events: EventSink,
    state: RecordingState,
    session: Option<RecordingSession>,
    last_token: SessionToken,
}

impl RecordingController {
    /// Create a new recording controller in idle state
    pub fn new(
        device: Box<dyn CaptureDevice>,
        permission: Arc<dyn PermissionGate>,
        store: Arc<dyn AssetStore>,
        events: EventSink,
    ) -> Self {
        Self {
            device,
            permission,
            store,
            events,
            state: RecordingState::Idle,
            session: None,
            last_token: SessionToken::default(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> RecordingState {
        self.state
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// Whether a capture device handle is currently held
    pub fn has_open_device(&self) -> bool {
        self.session.is_some()
    }

    /// Elapsed seconds of the running recording, 0 when idle
    pub fn elapsed_secs(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.elapsed_secs)
    }

    /// Start a new recording, replacing any existing clip.
    ///
    /// Fails with `PermissionDenied` before touching the clip or the device
    /// when microphone permission is missing. Must be called from within a
    /// tokio runtime; the elapsed-time tick runs as a task.
    pub fn start(&mut self) -> Result<ElapsedStream, RecordingError> {
        if self.is_recording() {
            warn!("Ignoring start: recording already in progress");
            return Err(RecordingError::AlreadyRecording);
        }
        if !self.permission.is_granted() {
            debug!("Not starting: microphone permission missing");
            return Err(RecordingError::PermissionDenied);
        }

        let output_path = self.store.resolve_path();
        if self.store.delete() {
            debug!("Removed previous clip at {}", output_path.display());
        }

        let token = self.last_token.next();
        self.last_token = token;

        let request = CaptureRequest {
            token,
            output_path,
            format: CaptureFormat::SPEECH_FLAC,
            max_duration: MAX_RECORDING_DURATION,
        };

        let mut handle = self.device.open(request, self.events.clone()).map_err(|e| {
            error!("Failed to open capture device: {}", e);
            RecordingError::StartFailed(e)
        })?;

        if let Err(e) = handle.prepare().and_then(|()| handle.start()) {
            handle.release();
            error!("Failed to start capture: {}", e);
            return Err(RecordingError::StartFailed(e));
        }

        let (elapsed_tx, elapsed_rx) = watch::channel(0);
        let ticker = spawn_ticker(token, self.events.clone());

        self.session = Some(RecordingSession {
            token,
            handle,
            elapsed_secs: 0,
            elapsed_tx,
            ticker,
        });
        self.transition(RecordingState::Recording);
        info!("Recording started (session {})", token);

        Ok(elapsed_rx)
    }

    /// Stop the running recording and finalize the clip
    pub fn stop(&mut self) -> Result<RecordingOutcome, RecordingError> {
        self.finish(false)
    }

    /// Stop the recording if one is running. Safe to call at any time.
    pub fn cancel(&mut self) -> Option<RecordingOutcome> {
        if !self.is_recording() {
            return None;
        }
        match self.stop() {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                warn!("Recording teardown failed: {}", e);
                None
            }
        }
    }

    /// Apply a tick or device signal posted for this controller.
    ///
    /// Events from a session that has already ended are ignored.
    pub fn handle_event(&mut self, event: RecorderEvent) -> Option<RecorderUpdate> {
        match event {
            RecorderEvent::Tick { token } => {
                let elapsed_secs = {
                    let session = self.session.as_mut().filter(|s| s.token == token)?;
                    session.elapsed_secs += 1;
                    session.elapsed_tx.send_replace(session.elapsed_secs);
                    session.elapsed_secs
                };

                if Duration::from_secs(u64::from(elapsed_secs)).reaches_cap() {
                    info!("Max duration reached after {} ticks, stopping", elapsed_secs);
                    return Some(RecorderUpdate::AutoStopped(self.finish(true)));
                }
                Some(RecorderUpdate::Tick { elapsed_secs })
            }
            RecorderEvent::MaxDurationReached { token } => {
                if !self.owns(token) {
                    debug!("Ignoring max-duration signal for stale session {}", token);
                    return None;
                }
                info!("Capture device reported max duration, stopping");
                Some(RecorderUpdate::AutoStopped(self.finish(true)))
            }
        }
    }

    fn owns(&self, token: SessionToken) -> bool {
        self.session.as_ref().is_some_and(|s| s.token == token)
    }

    /// Single stop path shared by user stop, tick cap and device cap
    fn finish(&mut self, duration_capped: bool) -> Result<RecordingOutcome, RecordingError> {
        let mut session = self.session.take().ok_or(RecordingError::NotRecording)?;
        session.ticker.abort();

        let stopped = session.handle.stop();
        session.handle.release();

        match stopped {
            Ok(()) => {
                self.transition(RecordingState::Idle);
                let asset = self.store.describe();
                info!(
                    "Recording saved: {} ({}s{})",
                    asset.human_readable_size(),
                    session.elapsed_secs,
                    if duration_capped { ", capped" } else { "" }
                );
                Ok(RecordingOutcome {
                    elapsed_secs: session.elapsed_secs,
                    duration_capped,
                    asset,
                })
            }
            Err(e) => {
                self.transition(RecordingState::Error);
                error!("Failed to finalize recording: {}", e);
                self.transition(RecordingState::Idle);
                Err(RecordingError::FinalizeFailed(e))
            }
        }
    }

    fn transition(&mut self, next: RecordingState) {
        debug!("Recording state {} -> {}", self.state, next);
        self.state = next;
    }
}

impl Drop for RecordingController {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.ticker.abort();
            let _ = session.handle.stop();
            session.handle.release();
        }
    }
}

/// Post a tick every second until aborted or the loop goes away
fn spawn_ticker(token: SessionToken, events: EventSink) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = TICK_INTERVAL.as_std();
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if !events.post(RecorderEvent::Tick { token }) {
                break;
            }
        }
    })
}
