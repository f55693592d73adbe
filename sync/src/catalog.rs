//! Catalog synchronization service.
//!
//! Mediates all reads and writes against the `products` collection and
//! mirrors it into a [`Catalog`]. The subscription is the single source
//! of truth: local writes go to the store and land in the mirror only
//! when the snapshot echo comes back. Nothing is applied optimistically.

use crate::collections;
use crate::error::Result;
use crate::store::{DocumentStore, Snapshot, StoreError, Subscription};
use prodlab_core::{default_products, BatchOp, BatchPlan, BatchReport, Catalog, Product, ProductId};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Owns the live catalog mirror and all product-collection IO.
#[derive(Debug)]
pub struct CatalogService<S> {
    store: S,
    state: Arc<RwLock<Catalog>>,
}

impl<S: DocumentStore> CatalogService<S> {
    /// Create a service over a store, with an empty catalog.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: Arc::new(RwLock::new(Catalog::new())),
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// A clone of the current catalog state.
    pub async fn catalog(&self) -> Catalog {
        self.state.read().await.clone()
    }

    /// The currently active product, if any.
    pub async fn active(&self) -> Option<Product> {
        self.state.read().await.active().cloned()
    }

    /// Activate a product by id. Returns false if it is not mirrored.
    pub async fn select(&self, id: &str) -> bool {
        self.state.write().await.select(id)
    }

    /// One-time bootstrap: fetch the collection and seed the defaults if
    /// and only if it is empty.
    ///
    /// Emptiness of the one-shot read is the only guard, so a user who
    /// deliberately deletes every product gets the defaults back on the
    /// next start. That reseed-on-empty policy is designed behavior.
    ///
    /// On failure the local catalog stays empty; there is no retry.
    pub async fn initialize(&self) {
        if let Err(e) = self.try_initialize().await {
            tracing::error!("error initializing catalog: {e}");
        }
    }

    /// Fallible initialization. Returns whether seeding ran.
    pub async fn try_initialize(&self) -> Result<bool> {
        let snapshot = self.store.get_all(collections::PRODUCTS).await?;
        if !snapshot.is_empty() {
            return Ok(false);
        }

        tracing::info!("products collection is empty, seeding defaults");
        for product in default_products() {
            self.store
                .upsert(collections::PRODUCTS, &product.id, product.to_fields())
                .await?;
        }
        Ok(true)
    }

    /// Subscribe to the products collection directly.
    pub fn subscription(&self) -> Subscription {
        self.store.subscribe(collections::PRODUCTS)
    }

    /// Start the listener task mirroring snapshots into the catalog.
    ///
    /// Every delivery replaces the product list wholesale and re-resolves
    /// the active selection. The returned guard stops the task when
    /// dropped; hold it for as long as the mirror should stay live.
    pub fn start_listener(&self) -> ListenerGuard {
        let mut subscription = self.subscription();
        let state = Arc::clone(&self.state);

        let task = tokio::spawn(async move {
            loop {
                match subscription.recv().await {
                    Ok(snapshot) => {
                        let products = products_from_snapshot(&snapshot);
                        state.write().await.apply_snapshot(products);
                    }
                    Err(StoreError::SubscriptionClosed) => {
                        // Catalog freezes at the last known snapshot
                        tracing::error!("products subscription closed");
                        break;
                    }
                    Err(e) => {
                        tracing::error!("error listening to products: {e}");
                        break;
                    }
                }
            }
        });

        ListenerGuard { task }
    }

    /// Apply a batch edit: reconcile the desired full product list
    /// against remote state. Failures are logged, not re-thrown.
    pub async fn apply_batch(&self, desired: &[Product]) {
        match self.try_apply_batch(desired).await {
            Ok(report) if report.is_clean() => {
                tracing::debug!("batch applied: {} operations", report.outcomes.len());
            }
            Ok(report) => {
                tracing::warn!(
                    "batch partially applied: {} succeeded, {} failed",
                    report.succeeded(),
                    report.failed()
                );
            }
            Err(e) => tracing::error!("error updating products: {e}"),
        }
    }

    /// Fallible batch application with per-operation outcomes.
    ///
    /// Steps are not transactional: a mid-batch failure leaves the remote
    /// collection partially reconciled, and the report records exactly
    /// which operations failed.
    pub async fn try_apply_batch(&self, desired: &[Product]) -> Result<BatchReport> {
        let snapshot = self.store.get_all(collections::PRODUCTS).await?;
        let current_ids: Vec<ProductId> = snapshot.iter().map(|doc| doc.id.clone()).collect();

        let plan = BatchPlan::compute(&current_ids, desired);
        let mut report = BatchReport::new();

        for id in &plan.deletes {
            let op = BatchOp::Delete { id: id.clone() };
            match self.store.delete(collections::PRODUCTS, id).await {
                Ok(()) => report.record_ok(op),
                Err(e) => {
                    tracing::warn!("delete of {id} failed: {e}");
                    report.record_failure(op, e.to_string());
                }
            }
        }

        for product in &plan.upserts {
            let op = BatchOp::Upsert {
                id: product.id.clone(),
            };
            match self
                .store
                .upsert(collections::PRODUCTS, &product.id, product.to_fields())
                .await
            {
                Ok(()) => report.record_ok(op),
                Err(e) => {
                    tracing::warn!("upsert of {} failed: {e}", product.id);
                    report.record_failure(op, e.to_string());
                }
            }
        }

        Ok(report)
    }
}

/// Decode a snapshot into products, skipping malformed documents.
fn products_from_snapshot(snapshot: &Snapshot) -> Vec<Product> {
    snapshot
        .iter()
        .filter_map(|doc| match Product::from_fields(&doc.id, doc.fields.clone()) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!("skipping malformed product document {}: {e}", doc.id);
                None
            }
        })
        .collect()
}

/// Handle on a running listener task. Dropping it stops the task.
#[derive(Debug)]
pub struct ListenerGuard {
    task: JoinHandle<()>,
}

impl ListenerGuard {
    /// Stop the listener explicitly.
    pub fn stop(&self) {
        self.task.abort();
    }

    /// Whether the listener task is still running.
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Document;
    use serde_json::json;

    #[test]
    fn malformed_documents_are_skipped() {
        let snapshot = vec![
            Document::new(
                "good",
                json!({
                    "name": "Good",
                    "purpose": "p",
                    "category": "Website",
                    "url": "https://example.com",
                    "accent": "#fff"
                }),
            ),
            Document::new("bad", json!({"name": 42})),
        ];

        let products = products_from_snapshot(&snapshot);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "good");
    }
}
