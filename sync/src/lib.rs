//! # Product Lab Sync
//!
//! Async synchronization layer between the deterministic catalog logic in
//! `prodlab-core` and a realtime document store.
//!
//! The store itself is an external collaborator behind the
//! [`DocumentStore`] trait: an opaque realtime collection API with
//! one-shot reads, full-replace upserts, deletes, and push subscriptions
//! that deliver the complete collection snapshot on every change. This
//! crate ships an in-memory implementation ([`MemoryStore`]) and a
//! JSON-file-persisted one ([`FileStore`]) for the CLI binaries.
//!
//! On top of that seam sit:
//!
//! - [`CatalogService`]: seed-if-empty initialization, a listener task
//!   that mirrors snapshots into a [`prodlab_core::Catalog`], and batch
//!   edit application via the core reconciler
//! - [`SettingsService`]: the load-then-save guarded sort-order singleton
//! - [`screenshot`]: best-effort thumbnail capture against third-party
//!   screenshot APIs
//!
//! Failure policy: public entry points catch errors at the operation
//! boundary and reduce them to a `tracing` log entry; `try_*` variants
//! return typed results. There are no retries, timeouts, or rollbacks.

pub mod catalog;
pub mod config;
pub mod error;
pub mod screenshot;
pub mod settings;
pub mod store;

// Re-export main types at crate root
pub use catalog::{CatalogService, ListenerGuard};
pub use config::{Config, ConfigError};
pub use error::SyncError;
pub use screenshot::{CaptureConfig, CaptureSummary, SingleCapture};
pub use settings::SettingsService;
pub use store::{Document, DocumentStore, FileStore, MemoryStore, Snapshot, StoreError, Subscription};

/// Logical collection names in the backing document store.
pub mod collections {
    /// The product catalog collection, keyed by product id.
    pub const PRODUCTS: &str = "products";
    /// The settings collection, holding one fixed-id document.
    pub const SETTINGS: &str = "settings";
}
