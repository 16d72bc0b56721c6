//! Filesystem asset store adapter

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::ports::AssetStore;
use crate::domain::asset::{AssetInfo, ASSET_DIR_NAME, ASSET_FILE_NAME};

/// Stores the clip at `<root>/notification_audio/hold_notification.flac`
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Create a store under the given storage root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn clip_path(&self) -> PathBuf {
        self.root.join(ASSET_DIR_NAME).join(ASSET_FILE_NAME)
    }
}

impl AssetStore for FsAssetStore {
    fn resolve_path(&self) -> PathBuf {
        let path = self.clip_path();
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                warn!("Failed to create {}: {}", dir.display(), e);
            }
        }
        path
    }

    fn exists(&self) -> bool {
        self.clip_path().is_file()
    }

    fn describe(&self) -> AssetInfo {
        let path = self.clip_path();
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                let readable = File::open(&path).is_ok();
                AssetInfo::new(path, true, meta.len(), readable)
            }
            _ => AssetInfo::missing(path),
        }
    }

    fn delete(&self) -> bool {
        let path = self.clip_path();
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed {}", path.display());
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                false
            }
        }
    }
}
