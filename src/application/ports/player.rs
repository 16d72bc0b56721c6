//! Playback device port interfaces

use std::path::PathBuf;

use super::device::DeviceError;
use crate::application::events::{EventSink, SessionToken};

/// What the audio is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioUsage {
    #[default]
    Media,
    VoiceCommunication,
}

/// What kind of content is being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    #[default]
    Speech,
    Music,
}

/// Media routing attributes for a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackAttributes {
    pub usage: AudioUsage,
    pub content: ContentType,
}

impl PlaybackAttributes {
    /// Media stream carrying recorded speech
    pub const SPEECH_MEDIA: Self = Self {
        usage: AudioUsage::Media,
        content: ContentType::Speech,
    };
}

/// Everything a playback device needs to open one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackRequest {
    /// Tag for events posted by this session
    pub token: SessionToken,
    pub path: PathBuf,
    pub attributes: PlaybackAttributes,
}

/// Port for opening media-output sessions
pub trait PlaybackDevice: Send + Sync {
    /// Open a playback resource for the clip at `request.path`.
    fn open(
        &self,
        request: PlaybackRequest,
        events: EventSink,
    ) -> Result<Box<dyn PlaybackHandle>, DeviceError>;
}

/// An open media-output resource.
///
/// Preparation is asynchronous: `prepare_async` returns immediately and the
/// device later posts `Prepared` or `Failed`. Once started it posts
/// `Completed` or `Failed`.
pub trait PlaybackHandle: Send {
    fn prepare_async(&mut self) -> Result<(), DeviceError>;

    /// Output volume in `0.0..=1.0`
    fn set_volume(&mut self, volume: f32) -> Result<(), DeviceError>;

    fn start(&mut self) -> Result<(), DeviceError>;

    fn is_playing(&self) -> bool;

    fn stop(&mut self) -> Result<(), DeviceError>;

    /// Free the device. Must be safe to call in any state, more than once.
    fn release(&mut self);
}
