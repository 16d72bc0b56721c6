//! Playback domain module

mod routing;
mod state;

pub use routing::RoutingMode;
pub use state::{PlaybackEnd, PlaybackState};
