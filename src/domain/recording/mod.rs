//! Recording domain module

mod duration;
mod state;

pub use duration::{Duration, MAX_RECORDING_DURATION, MAX_RECORDING_MS, TICK_INTERVAL};
pub use state::RecordingState;
