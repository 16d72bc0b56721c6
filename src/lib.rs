//! Hold notice - record and play the clip a waiting caller hears
//!
//! The crate manages a single stored audio clip: a recording dialog captures it
//! from the microphone (capped at 30 seconds), a playback controller plays it
//! through the in-call audio path, and a dispatcher maps incoming-call
//! notification actions onto call control and playback.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, state enums and errors
//! - **Application**: Controllers, the event loop and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, flacenc, notify-rust, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
