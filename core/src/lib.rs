//! # Product Lab Core
//!
//! Deterministic catalog logic for the Product Lab showcase.
//!
//! This crate holds everything about the product catalog that does not
//! touch the network: the data model, the seed set, the in-memory catalog
//! state container, display ordering, and batch reconciliation planning.
//! The async plumbing against the remote document store lives in
//! `prodlab-sync`.
//!
//! ## Design Principles
//!
//! - **No IO**: this crate has no knowledge of the document store, files,
//!   or HTTP
//! - **Snapshot-replace**: the catalog has a single state transition,
//!   [`Catalog::apply_snapshot`], which replaces the product list
//!   wholesale; there is no incremental patching and no optimistic apply
//! - **Plans, not effects**: batch edits are expressed as a [`BatchPlan`]
//!   of ordered operations that the caller executes and reports on
//!
//! ## Core Concepts
//!
//! ### Products
//!
//! A [`Product`] is a catalog entry: stable `id`, display fields, a color
//! accent, an ISO created date used for sorting, and optional screenshot
//! metadata.
//!
//! ### Catalog
//!
//! The [`Catalog`] mirrors the remote `products` collection and tracks the
//! active product. Every remote change arrives as a full snapshot; the
//! catalog re-resolves the active selection on each replacement.
//!
//! ### Settings
//!
//! The sort-order preference ([`SortOrder`]) persists as a singleton
//! [`Settings`] document. The [`LoadGate`] state machine suppresses saves
//! until the initial load attempt has completed, so an in-memory default
//! can never clobber a persisted value.
//!
//! ### Batch reconciliation
//!
//! [`BatchPlan::compute`] diffs a full desired product list against the
//! current remote id set: removed ids become deletes, every desired
//! product becomes an upsert (full-document replace covers update and
//! create uniformly).

pub mod catalog;
pub mod error;
pub mod order;
pub mod product;
pub mod reconcile;
pub mod seed;
pub mod settings;

// Re-export main types at crate root
pub use catalog::Catalog;
pub use error::Error;
pub use order::{arrange, sort_by_date, FALLBACK_DATE};
pub use product::{Category, Product};
pub use reconcile::{BatchOp, BatchPlan, BatchReport, OpOutcome};
pub use seed::default_products;
pub use settings::{LoadGate, LoadState, Settings, SortOrder, SETTINGS_DOC_ID};

/// Type aliases for clarity
pub type ProductId = String;
pub type CollectionName = String;
