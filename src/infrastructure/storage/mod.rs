//! Clip storage module

mod fs;

pub use fs::FsAssetStore;
