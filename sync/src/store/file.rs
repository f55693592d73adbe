//! File-backed document store.
//!
//! Wraps a [`MemoryStore`] with JSON persistence so the CLI binaries can
//! operate on durable state. Collections serialize through a `BTreeMap`
//! for deterministic output; the file carries a format version and files
//! from a newer format are rejected rather than misread.

use super::{Document, DocumentStore, MemoryStore, Snapshot, StoreError, Subscription};
use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Version of the store file format for future compatibility.
pub const STORE_FORMAT_VERSION: u32 = 1;

/// On-disk representation of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreFile {
    format_version: u32,
    collections: BTreeMap<String, Vec<Document>>,
}

/// A document store persisted to a single JSON file.
///
/// Reads happen against the in-memory state; [`FileStore::flush`] writes
/// the current state back to disk. Writers are expected to flush before
/// exiting.
#[derive(Debug)]
pub struct FileStore {
    inner: MemoryStore,
    path: PathBuf,
}

impl FileStore {
    /// Open a store file, starting empty if the file does not exist.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = MemoryStore::new();

        if tokio::fs::try_exists(&path).await? {
            let raw = tokio::fs::read_to_string(&path).await?;
            let file: StoreFile = serde_json::from_str(&raw)
                .map_err(|e| SyncError::InvalidStoreFile(e.to_string()))?;

            if file.format_version > STORE_FORMAT_VERSION {
                return Err(SyncError::InvalidStoreFile(format!(
                    "unsupported format version: {} (max supported: {})",
                    file.format_version, STORE_FORMAT_VERSION
                )));
            }

            inner.import(file.collections);
        }

        Ok(Self { inner, path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current state to disk.
    pub async fn flush(&self) -> Result<()> {
        let file = StoreFile {
            format_version: STORE_FORMAT_VERSION,
            collections: self.inner.export(),
        };

        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| SyncError::InvalidStoreFile(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

impl DocumentStore for FileStore {
    async fn get_all(&self, collection: &str) -> std::result::Result<Snapshot, StoreError> {
        self.inner.get_all(collection).await
    }

    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> std::result::Result<Option<serde_json::Value>, StoreError> {
        self.inner.get_one(collection, id).await
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> std::result::Result<(), StoreError> {
        self.inner.upsert(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> std::result::Result<(), StoreError> {
        self.inner.delete(collection, id).await
    }

    fn subscribe(&self, collection: &str) -> Subscription {
        self.inner.subscribe(collection)
    }
}
