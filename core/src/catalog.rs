//! Catalog - the in-memory state container.
//!
//! The catalog mirrors the remote `products` collection and tracks the
//! currently active product. It has a single state transition:
//! [`Catalog::apply_snapshot`] replaces the product list wholesale with
//! the contents of a delivered snapshot. Local writes are never applied
//! optimistically; they reach this container only through the snapshot
//! channel, which is the single source of truth.

use crate::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// The live mirror of the products collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    products: Vec<Product>,
    active: Option<Product>,
}

impl Catalog {
    /// Create an empty catalog with no active product.
    pub fn new() -> Self {
        Self::default()
    }

    /// All products in delivery order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The currently active product, if any.
    pub fn active(&self) -> Option<&Product> {
        self.active.as_ref()
    }

    /// Get a product by id.
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Ids of all products, in delivery order.
    pub fn ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }

    /// Count of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace the product list with a delivered snapshot and re-resolve
    /// the active selection.
    ///
    /// Selection policy:
    /// - an active product still present in the snapshot stays active with
    ///   its fields refreshed;
    /// - an active product missing from a non-empty snapshot falls back to
    ///   the first element, in delivery order;
    /// - an empty snapshot clears the selection;
    /// - with no prior selection, a non-empty snapshot activates its first
    ///   element.
    pub fn apply_snapshot(&mut self, products: Vec<Product>) {
        self.products = products;

        let active_id = self.active.as_ref().map(|p| p.id.clone());
        self.active = match active_id {
            Some(id) => self
                .get(&id)
                .cloned()
                .or_else(|| self.products.first().cloned()),
            None => self.products.first().cloned(),
        };
    }

    /// Activate a product by id. Returns false if it is not in the
    /// catalog, leaving the current selection untouched.
    pub fn select(&mut self, id: &str) -> bool {
        match self.get(id) {
            Some(product) => {
                self.active = Some(product.clone());
                true
            }
            None => false,
        }
    }
}
