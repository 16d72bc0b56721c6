//! Infrastructure layer - Adapter implementations
//!
//! Concrete implementations of the application ports for a desktop host:
//! cpal capture, rodio playback, filesystem storage, process-local routing,
//! shell-command call control, desktop notifications and XDG config.

pub mod call;
pub mod config;
pub mod notification;
pub mod permission;
pub mod playback;
pub mod recording;
pub mod routing;
pub mod storage;

pub use call::CommandCallControl;
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use permission::InputDevicePermission;
pub use playback::RodioPlaybackDevice;
pub use recording::CpalCaptureDevice;
pub use routing::ProcessRouting;
pub use storage::FsAssetStore;
