//! The document store seam.
//!
//! The remote store is an opaque realtime collection API. Everything the
//! application needs from it is the capability surface below: one-shot
//! reads, full-replace upserts, deletes, and a push channel that delivers
//! the complete ordered collection snapshot on every change.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

pub mod file;
pub mod memory;

pub use file::{FileStore, STORE_FORMAT_VERSION};
pub use memory::MemoryStore;

/// A document as delivered by the store: id plus JSON field map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// The document key within its collection
    pub id: String,
    /// The full field map (replace semantics on write)
    pub fields: serde_json::Value,
}

impl Document {
    /// Create a document.
    pub fn new(id: impl Into<String>, fields: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// The complete contents of a collection at one point in time, in
/// delivery order.
pub type Snapshot = Vec<Document>;

/// Errors from the document store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("remote read failed: {0}")]
    Read(String),

    #[error("remote write failed: {0}")]
    Write(String),

    #[error("subscription channel closed")]
    SubscriptionClosed,
}

/// A live push channel of collection snapshots.
///
/// Dropping the subscription tears the listener down; that is the
/// resource-lifetime contract for unmounting a consumer.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<Snapshot>,
}

impl Subscription {
    /// Wrap a raw snapshot receiver. Store implementations use this to
    /// hand out subscriptions.
    pub fn new(receiver: broadcast::Receiver<Snapshot>) -> Self {
        Self { receiver }
    }

    /// Wait for the next snapshot.
    ///
    /// Deliveries arrive in apply order, at least once per underlying
    /// change. A lagged receiver skips straight to newer snapshots, which
    /// is safe because every delivery is a full replacement.
    pub async fn recv(&mut self) -> Result<Snapshot, StoreError> {
        loop {
            match self.receiver.recv().await {
                Ok(snapshot) => return Ok(snapshot),
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => {
                    return Err(StoreError::SubscriptionClosed)
                }
            }
        }
    }

    /// Poll for a pending snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<Snapshot> {
        loop {
            match self.receiver.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

/// An opaque realtime collection store.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Fetch the full collection snapshot at call time.
    async fn get_all(&self, collection: &str) -> Result<Snapshot, StoreError>;

    /// Fetch one document's field map by id.
    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError>;

    /// Insert or fully replace a document.
    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), StoreError>;

    /// Delete a document by id. Deleting an absent id is not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Register a push listener on a collection.
    fn subscribe(&self, collection: &str) -> Subscription;
}
