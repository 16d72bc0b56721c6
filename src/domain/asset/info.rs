//! Asset metadata value object

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Fixed subdirectory of the storage root holding the clip
pub const ASSET_DIR_NAME: &str = "notification_audio";

/// Fixed file name of the single hold-notification clip
pub const ASSET_FILE_NAME: &str = "hold_notification.flac";

/// Snapshot of the single persisted clip.
///
/// A zero-length file exists on disk but is not a usable asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    path: PathBuf,
    exists: bool,
    size_bytes: u64,
    readable: bool,
}

impl AssetInfo {
    /// Create an AssetInfo from raw metadata
    pub fn new(path: impl Into<PathBuf>, exists: bool, size_bytes: u64, readable: bool) -> Self {
        Self {
            path: path.into(),
            exists,
            size_bytes,
            readable,
        }
    }

    /// Asset snapshot for a path with nothing on disk
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false, 0, false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    pub fn readable(&self) -> bool {
        self.readable
    }

    /// Whether the clip exists and holds data
    pub fn is_usable(&self) -> bool {
        self.exists && self.size_bytes > 0
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes;
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.exists {
            write!(
                f,
                "File exists: {}\nSize: {} bytes\nReadable: {}",
                self.path.display(),
                self.size_bytes,
                self.readable
            )
        } else {
            write!(f, "File does not exist: {}", self.path.display())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_is_not_usable() {
        let info = AssetInfo::missing("/data/hold_notification.flac");
        assert!(!info.exists());
        assert!(!info.is_usable());
    }

    #[test]
    fn empty_file_is_not_usable() {
        let info = AssetInfo::new("/data/hold_notification.flac", true, 0, true);
        assert!(info.exists());
        assert!(!info.is_usable());
    }

    #[test]
    fn non_empty_file_is_usable() {
        let info = AssetInfo::new("/data/hold_notification.flac", true, 12, true);
        assert!(info.is_usable());
    }

    #[test]
    fn human_readable_size_units() {
        assert_eq!(AssetInfo::new("a", true, 500, true).human_readable_size(), "500 B");
        assert_eq!(
            AssetInfo::new("a", true, 2048, true).human_readable_size(),
            "2.0 KB"
        );
        assert_eq!(
            AssetInfo::new("a", true, 2 * 1024 * 1024, true).human_readable_size(),
            "2.0 MB"
        );
    }

    #[test]
    fn display_existing() {
        let info = AssetInfo::new("/data/clip.flac", true, 42, true);
        let text = info.to_string();
        assert!(text.contains("File exists: /data/clip.flac"));
        assert!(text.contains("Size: 42 bytes"));
        assert!(text.contains("Readable: true"));
    }

    #[test]
    fn display_missing() {
        let info = AssetInfo::missing("/data/clip.flac");
        assert_eq!(info.to_string(), "File does not exist: /data/clip.flac");
    }
}
