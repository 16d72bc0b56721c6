//! Domain layer - Core business logic
//!
//! Contains value objects, session state machines, and domain errors.
//! This layer has no dependencies on external systems.

pub mod asset;
pub mod call;
pub mod config;
pub mod error;
pub mod playback;
pub mod recording;

// Re-export common types
pub use asset::AssetInfo;
pub use call::CallAction;
pub use config::AppConfig;
pub use error::*;
pub use playback::{PlaybackEnd, PlaybackState, RoutingMode};
pub use recording::{Duration, RecordingState, MAX_RECORDING_DURATION};
