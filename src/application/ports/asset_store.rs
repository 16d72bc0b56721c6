//! Notification audio storage port interface

use std::path::PathBuf;

use crate::domain::asset::AssetInfo;

/// Port for the single hold-notification clip on disk.
///
/// No locking: callers serialize access through their own state machines.
pub trait AssetStore: Send + Sync {
    /// Canonical clip path. Creates the parent directory if needed and never
    /// fails; directory errors are ignored.
    fn resolve_path(&self) -> PathBuf;

    /// Whether a clip file exists (it may still be empty)
    fn exists(&self) -> bool;

    /// Metadata snapshot of the clip
    fn describe(&self) -> AssetInfo;

    /// Remove the clip. Returns whether a file was actually removed.
    fn delete(&self) -> bool;
}
