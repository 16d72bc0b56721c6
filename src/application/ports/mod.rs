//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod asset_store;
pub mod call;
pub mod config;
pub mod device;
pub mod notifier;
pub mod permission;
pub mod player;
pub mod recorder;
pub mod routing;

// Re-export common types
pub use asset_store::AssetStore;
pub use call::CallControl;
pub use config::ConfigStore;
pub use device::DeviceError;
pub use notifier::{NotificationError, Notifier};
pub use permission::{PermissionGate, RECORD_AUDIO_REQUEST_CODE};
pub use player::{
    AudioUsage, ContentType, PlaybackAttributes, PlaybackDevice, PlaybackHandle, PlaybackRequest,
};
pub use recorder::{CaptureDevice, CaptureFormat, CaptureHandle, CaptureRequest};
pub use routing::{AudioRouting, RoutingError};
