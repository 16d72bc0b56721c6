//! Microphone permission backed by input-device availability
//!
//! Desktops have no runtime permission prompt. Capture is allowed when an
//! input device can be opened, and a request is answered immediately by
//! probing again.

use cpal::traits::HostTrait;
use tracing::debug;

use crate::application::events::{EventSink, LoopEvent};
use crate::application::ports::PermissionGate;

#[derive(Debug, Clone, Copy, Default)]
pub struct InputDevicePermission;

impl InputDevicePermission {
    pub fn new() -> Self {
        Self
    }
}

impl PermissionGate for InputDevicePermission {
    fn is_granted(&self) -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn request(&self, request_code: u32, events: &EventSink) {
        let granted = self.is_granted();
        debug!("Permission request {} answered: {}", request_code, granted);
        events.post(LoopEvent::Permission {
            request_code,
            granted,
        });
    }
}
