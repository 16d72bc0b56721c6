//! Notification audio asset domain module

mod info;

pub use info::{AssetInfo, ASSET_DIR_NAME, ASSET_FILE_NAME};
