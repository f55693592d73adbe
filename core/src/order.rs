//! Display ordering for the catalog.
//!
//! Ordering never mutates the catalog itself; it produces a fresh
//! arrangement for display. Under date order the arrangement is
//! deterministic; under random order a full unbiased permutation is drawn
//! on every call.

use crate::{Product, SortOrder};
use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fallback date substituted for a missing or unparseable `created_date`,
/// chosen so undated products sort as oldest.
pub const FALLBACK_DATE: &str = "2026-01-01";

fn sort_key(product: &Product) -> NaiveDate {
    let fallback =
        NaiveDate::parse_from_str(FALLBACK_DATE, "%Y-%m-%d").unwrap_or_default();

    if product.created_date.is_empty() {
        return fallback;
    }
    NaiveDate::parse_from_str(&product.created_date, "%Y-%m-%d").unwrap_or(fallback)
}

/// Arrange newest-first by created date.
///
/// The sort is stable, so products sharing a date (including all
/// fallback-dated ones) keep their delivery order.
pub fn sort_by_date(products: &[Product]) -> Vec<Product> {
    let mut arranged = products.to_vec();
    arranged.sort_by(|a, b| sort_key(b).cmp(&sort_key(a)));
    arranged
}

/// Draw a uniform random permutation (Fisher-Yates).
pub fn shuffled<R: Rng + ?Sized>(products: &[Product], rng: &mut R) -> Vec<Product> {
    let mut arranged = products.to_vec();
    arranged.shuffle(rng);
    arranged
}

/// Arrange products under the given sort order.
pub fn arrange<R: Rng + ?Sized>(
    products: &[Product],
    order: SortOrder,
    rng: &mut R,
) -> Vec<Product> {
    match order {
        SortOrder::Date => sort_by_date(products),
        SortOrder::Random => shuffled(products, rng),
    }
}
