//! Application layer - Controllers, coordinator and port interfaces
//!
//! Contains the recording/playback state machines, the dialog coordinator,
//! the notification action dispatcher and the trait definitions for the
//! devices and services they drive.

pub mod dialog;
pub mod dispatcher;
pub mod events;
pub mod playback;
pub mod ports;
pub mod recording;

#[cfg(test)]
pub(crate) mod test_support;

pub use dialog::{DialogUpdate, DialogUpdates, Notice, RecordingDialogCoordinator, RenderState};
pub use dispatcher::NotificationActionDispatcher;
pub use events::{EventLoop, EventSink, LoopEvent, PlaybackEvent, RecorderEvent, SessionToken};
pub use playback::{CompletionCallback, PlaybackController};
pub use recording::{
    ElapsedStream, RecorderUpdate, RecordingController, RecordingError, RecordingOutcome,
};
