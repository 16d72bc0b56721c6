//! Recording infrastructure module
//!
//! Captures from the default microphone with cpal and stores the clip as
//! 16 kHz mono FLAC.

mod cpal_capture;
mod flac_encoder;
mod pcm;

pub use cpal_capture::{CpalCaptureDevice, CpalCaptureHandle};
pub use flac_encoder::{encode_flac, EncodingError};
