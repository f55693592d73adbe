//! Unified error handling for the sync layer.

use crate::store::StoreError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("core error: {0}")]
    Core(#[from] prodlab_core::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid store file: {0}")]
    InvalidStoreFile(String),

    #[error("screenshot capture failed: {0}")]
    Capture(String),
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
