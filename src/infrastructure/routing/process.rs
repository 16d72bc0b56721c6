//! Process-local audio routing
//!
//! Desktop audio stacks have no global call-mode switch, so the mode is
//! tracked in memory for the lifetime of the process.

use std::sync::Mutex;

use tracing::debug;

use crate::application::ports::{AudioRouting, RoutingError};
use crate::domain::playback::RoutingMode;

#[derive(Debug, Default)]
pub struct ProcessRouting {
    mode: Mutex<RoutingMode>,
}

impl ProcessRouting {
    /// Start in the given mode
    pub fn new(mode: RoutingMode) -> Self {
        Self {
            mode: Mutex::new(mode),
        }
    }
}

impl AudioRouting for ProcessRouting {
    fn mode(&self) -> RoutingMode {
        *self.mode.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_mode(&self, mode: RoutingMode) -> Result<(), RoutingError> {
        let mut current = self.mode.lock().unwrap_or_else(|e| e.into_inner());
        if *current != mode {
            debug!("Audio mode {} -> {}", *current, mode);
            *current = mode;
        }
        Ok(())
    }
}
