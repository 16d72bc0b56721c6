//! Playback controller
//!
//! Owns the media-output resource used to play the hold-notification clip,
//! both for preview in the dialog and after an accept-and-play action.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::playback::{PlaybackEnd, PlaybackState, RoutingMode};

use super::events::{EventSink, PlaybackEvent, SessionToken};
use super::ports::{
    AssetStore, AudioRouting, PlaybackAttributes, PlaybackDevice, PlaybackHandle, PlaybackRequest,
};

/// Output volume applied once the device is prepared
pub const MAX_VOLUME: f32 = 1.0;

/// Invoked once when a `play()` request reaches a terminal state
pub type CompletionCallback = Box<dyn FnOnce(PlaybackEnd) + Send>;

struct PlaybackSession {
    token: SessionToken,
    handle: Box<dyn PlaybackHandle>,
    prepared: bool,
    /// Routing mode captured before this session touched it
    saved_mode: RoutingMode,
    /// Taken exactly once when the session leaves `Preparing`/`Playing`
    on_complete: Option<CompletionCallback>,
}

/// Drives one playback at a time.
///
/// State machine:
///   IDLE -> PREPARING (play)
///   PREPARING -> PLAYING (device prepared)
///   PLAYING -> IDLE (completed)
///   PREPARING | PLAYING -> ERROR -> IDLE (device failure)
///   any -> IDLE (stop)
///
/// Every exit from a session goes through `close_session`, which restores the
/// saved routing mode and releases the device.
pub struct PlaybackController {
    device: Box<dyn PlaybackDevice>,
    routing: Arc<dyn AudioRouting>,
    store: Arc<dyn AssetStore>,
    events: EventSink,
    state: PlaybackState,
    session: Option<PlaybackSession>,
    last_token: SessionToken,
}

impl PlaybackController {
    /// Create a new playback controller in idle state
    pub fn new(
        device: Box<dyn PlaybackDevice>,
        routing: Arc<dyn AudioRouting>,
        store: Arc<dyn AssetStore>,
        events: EventSink,
    ) -> Self {
        Self {
            device,
            routing,
            store,
            events,
            state: PlaybackState::Idle,
            session: None,
            last_token: SessionToken::default(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if nothing is playing or preparing
    pub fn is_idle(&self) -> bool {
        self.state == PlaybackState::Idle
    }

    /// Whether a playback device handle is currently held
    pub fn has_open_device(&self) -> bool {
        self.session.is_some()
    }

    /// Whether the current session got past preparation
    pub fn is_prepared(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.prepared)
    }

    /// Play the stored clip.
    ///
    /// A missing or empty clip completes immediately. Otherwise any running
    /// playback is stopped first and preparation starts; the rest happens
    /// through [`handle_event`](Self::handle_event). `on_complete` is called
    /// exactly once unless the session is cut short by [`stop`](Self::stop).
    ///
    /// Returns the session token while preparation is pending.
    pub fn play<F>(&mut self, on_complete: F) -> Option<SessionToken>
    where
        F: FnOnce(PlaybackEnd) + Send + 'static,
    {
        let asset = self.store.describe();
        if !asset.exists() {
            warn!("Audio file does not exist: {}", asset.path().display());
            on_complete(PlaybackEnd::MissingAsset);
            return None;
        }
        if asset.size_bytes() == 0 {
            warn!("Audio file is empty: {}", asset.path().display());
            on_complete(PlaybackEnd::EmptyAsset);
            return None;
        }

        self.stop();

        let saved_mode = self.routing.mode();
        let token = self.last_token.next();
        self.last_token = token;

        let request = PlaybackRequest {
            token,
            path: asset.path().to_path_buf(),
            attributes: PlaybackAttributes::SPEECH_MEDIA,
        };

        debug!("Starting playback of {} (session {})", asset.path().display(), token);
        let handle = match self.device.open(request, self.events.clone()) {
            Ok(handle) => handle,
            Err(e) => {
                error!("Failed to open playback device: {}", e);
                self.restore_routing(saved_mode);
                on_complete(PlaybackEnd::Failed(e.to_string()));
                return None;
            }
        };

        self.session = Some(PlaybackSession {
            token,
            handle,
            prepared: false,
            saved_mode,
            on_complete: Some(Box::new(on_complete)),
        });
        self.transition(PlaybackState::Preparing);

        let prepared = match self.session.as_mut() {
            Some(session) => session.handle.prepare_async(),
            None => return None,
        };
        if let Err(e) = prepared {
            error!("Failed to prepare playback: {}", e);
            self.fail(e.to_string());
            return None;
        }

        Some(token)
    }

    /// Forcibly end the current session without invoking its callback.
    /// Safe to call when idle.
    pub fn stop(&mut self) {
        if self.session.is_some() {
            debug!("Stopping playback");
            drop(self.close_session());
        }
    }

    /// Apply a device callback posted for this controller.
    ///
    /// Callbacks for another session, or for a phase the session has already
    /// left, are ignored.
    pub fn handle_event(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Prepared { token } => {
                if self.is_current(token, PlaybackState::Preparing) {
                    self.on_prepared();
                } else {
                    debug!("Ignoring prepared callback for stale session {}", token);
                }
            }
            PlaybackEvent::Completed { token } => {
                if self.is_current(token, PlaybackState::Playing) {
                    info!("Playback completed");
                    self.finish(PlaybackEnd::Finished);
                } else {
                    debug!("Ignoring completion for stale session {}", token);
                }
            }
            PlaybackEvent::Failed { token, reason } => {
                if self.owns(token) && self.state.is_active() {
                    error!("Playback device error: {}", reason);
                    self.fail(reason);
                } else {
                    debug!("Ignoring device error for stale session {}: {}", token, reason);
                }
            }
        }
    }

    fn on_prepared(&mut self) {
        debug!("Playback prepared, starting");
        if let Err(e) = self.routing.set_mode(RoutingMode::Normal) {
            self.fail(e.to_string());
            return;
        }

        let started = match self.session.as_mut() {
            Some(session) => {
                session.prepared = true;
                session
                    .handle
                    .set_volume(MAX_VOLUME)
                    .and_then(|()| session.handle.start())
            }
            None => return,
        };

        match started {
            Ok(()) => self.transition(PlaybackState::Playing),
            Err(e) => self.fail(e.to_string()),
        }
    }

    fn owns(&self, token: SessionToken) -> bool {
        self.session.as_ref().is_some_and(|s| s.token == token)
    }

    fn is_current(&self, token: SessionToken, state: PlaybackState) -> bool {
        self.owns(token) && self.state == state
    }

    fn fail(&mut self, reason: String) {
        self.transition(PlaybackState::Error);
        self.finish(PlaybackEnd::Failed(reason));
    }

    fn finish(&mut self, end: PlaybackEnd) {
        if let Some(on_complete) = self.close_session() {
            on_complete(end);
        }
    }

    /// The only way out of a session: restore routing, stop, release, go idle
    fn close_session(&mut self) -> Option<CompletionCallback> {
        let mut session = self.session.take()?;

        self.restore_routing(session.saved_mode);
        if session.handle.is_playing() {
            if let Err(e) = session.handle.stop() {
                debug!("Ignoring error while stopping playback: {}", e);
            }
        }
        session.handle.release();
        self.transition(PlaybackState::Idle);

        session.on_complete.take()
    }

    fn restore_routing(&self, mode: RoutingMode) {
        if let Err(e) = self.routing.set_mode(mode) {
            warn!("Failed to restore audio mode: {}", e);
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        debug!("Playback state {} -> {}", self.state, next);
        self.state = next;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.stop();
    }
}
