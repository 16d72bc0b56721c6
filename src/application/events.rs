//! Event loop plumbing
//!
//! Device callbacks, ticks and permission answers never touch controller
//! state directly. They are posted as [`LoopEvent`]s and dispatched on the
//! single task that owns the controllers.

use std::fmt;

use tokio::sync::mpsc;

/// Identifies one device session. Events carrying a stale token are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const fn new(generation: u64) -> Self {
        Self(generation)
    }

    /// The token for the session after this one
    pub const fn next(&self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Signals from the capture side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderEvent {
    /// One second of recording elapsed
    Tick { token: SessionToken },
    /// The capture device hit its configured duration cap
    MaxDurationReached { token: SessionToken },
}

/// Signals from the playback device
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Asynchronous preparation finished; playback may start
    Prepared { token: SessionToken },
    /// The clip played to the end
    Completed { token: SessionToken },
    /// The device failed while preparing or playing
    Failed { token: SessionToken, reason: String },
}

/// Everything that can be scheduled back onto the loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Recorder(RecorderEvent),
    Playback(PlaybackEvent),
    /// Answer to a permission request, keyed by its request code
    Permission { request_code: u32, granted: bool },
}

impl From<RecorderEvent> for LoopEvent {
    fn from(event: RecorderEvent) -> Self {
        Self::Recorder(event)
    }
}

impl From<PlaybackEvent> for LoopEvent {
    fn from(event: PlaybackEvent) -> Self {
        Self::Playback(event)
    }
}

/// Handle devices and timers use to post events onto the loop
#[derive(Debug, Clone)]
pub struct EventSink {
    sender: mpsc::UnboundedSender<LoopEvent>,
}

impl EventSink {
    /// Post an event. Returns false once the loop has shut down.
    pub fn post(&self, event: impl Into<LoopEvent>) -> bool {
        self.sender.send(event.into()).is_ok()
    }
}

/// Receiving end of the loop, owned by the task that owns the controllers
#[derive(Debug)]
pub struct EventLoop {
    sink: EventSink,
    receiver: mpsc::UnboundedReceiver<LoopEvent>,
}

impl EventLoop {
    /// Create a new, empty event loop
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sink: EventSink { sender },
            receiver,
        }
    }

    /// Get a sink for posting events onto this loop
    pub fn sink(&self) -> EventSink {
        self.sink.clone()
    }

    /// Wait for the next event
    pub async fn next(&mut self) -> Option<LoopEvent> {
        self.receiver.recv().await
    }

    /// Take the next event if one is already queued
    pub fn try_next(&mut self) -> Option<LoopEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_next_increments() {
        let token = SessionToken::new(4);
        assert_eq!(token.next(), SessionToken::new(5));
        assert_ne!(token, token.next());
    }

    #[test]
    fn posted_events_arrive_in_order() {
        let mut event_loop = EventLoop::new();
        let sink = event_loop.sink();
        let token = SessionToken::new(1);

        assert!(sink.post(RecorderEvent::Tick { token }));
        assert!(sink.post(PlaybackEvent::Prepared { token }));

        assert_eq!(
            event_loop.try_next(),
            Some(LoopEvent::Recorder(RecorderEvent::Tick { token }))
        );
        assert_eq!(
            event_loop.try_next(),
            Some(LoopEvent::Playback(PlaybackEvent::Prepared { token }))
        );
        assert_eq!(event_loop.try_next(), None);
    }

    #[test]
    fn post_after_loop_dropped_reports_closed() {
        let event_loop = EventLoop::new();
        let sink = event_loop.sink();
        drop(event_loop);

        assert!(!sink.post(LoopEvent::Permission {
            request_code: 101,
            granted: true
        }));
    }

    #[tokio::test]
    async fn next_waits_for_event() {
        let mut event_loop = EventLoop::new();
        let sink = event_loop.sink();
        tokio::spawn(async move {
            sink.post(LoopEvent::Permission {
                request_code: 7,
                granted: false,
            });
        });

        assert_eq!(
            event_loop.next().await,
            Some(LoopEvent::Permission {
                request_code: 7,
                granted: false
            })
        );
    }
}
