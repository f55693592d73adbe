//! In-memory document store.
//!
//! The reference `DocumentStore` implementation: collections live in a
//! `DashMap`, documents keep insertion order, and every write fans the
//! full collection snapshot out to subscribers in apply order. Also the
//! backing state of [`FileStore`](super::FileStore).

use super::{Document, DocumentStore, Snapshot, StoreError, Subscription};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Buffered snapshots per collection channel. Consumers that fall behind
/// skip to newer snapshots, so a shallow buffer is enough.
const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
struct CollectionState {
    /// Documents in insertion order
    docs: Vec<Document>,
    sender: broadcast::Sender<Snapshot>,
}

impl CollectionState {
    fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            docs: Vec::new(),
            sender,
        }
    }

    /// Publish the current snapshot to subscribers. Send fails only when
    /// nobody is subscribed, which is fine.
    fn publish(&self) {
        let _ = self.sender.send(self.docs.clone());
    }
}

/// In-memory realtime collection store.
///
/// Clones share the same underlying collections, so a clone works as a
/// second handle on the same store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<DashMap<String, CollectionState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Export all collections, ordered deterministically by name.
    pub fn export(&self) -> BTreeMap<String, Vec<Document>> {
        self.collections
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().docs.clone()))
            .collect()
    }

    /// Replace store contents with the given collections.
    pub fn import(&self, collections: BTreeMap<String, Vec<Document>>) {
        self.collections.clear();
        for (name, docs) in collections {
            let mut state = CollectionState::new();
            state.docs = docs;
            self.collections.insert(name, state);
        }
    }
}

impl DocumentStore for MemoryStore {
    async fn get_all(&self, collection: &str) -> Result<Snapshot, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .map(|state| state.docs.clone())
            .unwrap_or_default())
    }

    async fn get_one(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.collections.get(collection).and_then(|state| {
            state
                .docs
                .iter()
                .find(|doc| doc.id == id)
                .map(|doc| doc.fields.clone())
        }))
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: serde_json::Value,
    ) -> Result<(), StoreError> {
        let mut state = self
            .collections
            .entry(collection.to_string())
            .or_insert_with(CollectionState::new);

        match state.docs.iter_mut().find(|doc| doc.id == id) {
            Some(doc) => doc.fields = fields,
            None => state.docs.push(Document::new(id, fields)),
        }
        state.publish();
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        if let Some(mut state) = self.collections.get_mut(collection) {
            let before = state.docs.len();
            state.docs.retain(|doc| doc.id != id);
            if state.docs.len() != before {
                state.publish();
            }
        }
        Ok(())
    }

    fn subscribe(&self, collection: &str) -> Subscription {
        let state = self
            .collections
            .entry(collection.to_string())
            .or_insert_with(CollectionState::new);
        Subscription::new(state.sender.subscribe())
    }
}
