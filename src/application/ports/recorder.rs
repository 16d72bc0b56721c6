//! Capture device port interfaces

use std::path::PathBuf;

use super::device::DeviceError;
use crate::application::events::{EventSink, SessionToken};
use crate::domain::recording::Duration;

/// Fixed container/codec the clip is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureFormat {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Output channel count
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl CaptureFormat {
    /// 16 kHz mono 16-bit FLAC, the only format clips are stored in
    pub const SPEECH_FLAC: Self = Self {
        sample_rate: 16_000,
        channels: 1,
        bits_per_sample: 16,
    };
}

impl Default for CaptureFormat {
    fn default() -> Self {
        Self::SPEECH_FLAC
    }
}

/// Everything a capture device needs to open one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Tag for events posted by this session
    pub token: SessionToken,
    /// Where the finished clip is written on stop
    pub output_path: PathBuf,
    pub format: CaptureFormat,
    /// The device posts `MaxDurationReached` once this much audio is captured
    pub max_duration: Duration,
}

/// Port for opening microphone capture sessions
pub trait CaptureDevice: Send + Sync {
    /// Open a capture resource for one recording.
    ///
    /// The returned handle owns the device until `release` is called.
    fn open(
        &self,
        request: CaptureRequest,
        events: EventSink,
    ) -> Result<Box<dyn CaptureHandle>, DeviceError>;
}

/// An open microphone capture resource
pub trait CaptureHandle: Send {
    /// Resolve and configure the input device
    fn prepare(&mut self) -> Result<(), DeviceError>;

    /// Begin capturing audio
    fn start(&mut self) -> Result<(), DeviceError>;

    /// Stop capturing and write the finished clip to the output path
    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Free the device. Must be safe to call in any state, more than once.
    fn release(&mut self);
}
