//! Microphone permission port interface

use crate::application::events::EventSink;

/// Request code used when asking for microphone access from the dialog
pub const RECORD_AUDIO_REQUEST_CODE: u32 = 101;

/// Port for checking and requesting microphone-capture permission
pub trait PermissionGate: Send + Sync {
    /// Whether microphone capture is currently allowed
    fn is_granted(&self) -> bool;

    /// Ask for permission. The answer is posted later as
    /// `LoopEvent::Permission { request_code, granted }`.
    fn request(&self, request_code: u32, events: &EventSink);
}
