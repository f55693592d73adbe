//! Edge case tests for prodlab-core
//!
//! These tests cover boundary conditions and cross-module flows.

use prodlab_core::{
    default_products, sort_by_date, BatchPlan, Catalog, Category, Product, SortOrder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn product(id: &str, name: &str, created_date: &str) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        purpose: "test".into(),
        category: Category::Website,
        url: format!("https://example.com/{id}"),
        accent: "#007aff".into(),
        created_date: created_date.into(),
        thumbnail: None,
        screenshot_url: None,
        last_screenshot_update: None,
    }
}

// ============================================================================
// Snapshot Churn
// ============================================================================

#[test]
fn repeated_identical_snapshots_are_idempotent() {
    let mut catalog = Catalog::new();
    let snapshot = vec![product("a", "Alpha", "2026-01-10")];

    catalog.apply_snapshot(snapshot.clone());
    let after_first = catalog.clone();

    // At-least-once delivery: a redelivered snapshot changes nothing
    catalog.apply_snapshot(snapshot);
    assert_eq!(catalog, after_first);
}

#[test]
fn active_selection_tracks_churn_across_snapshots() {
    let mut catalog = Catalog::new();

    catalog.apply_snapshot(vec![
        product("a", "Alpha", "2026-01-10"),
        product("b", "Bravo", "2026-01-11"),
    ]);
    catalog.select("b");

    // "b" deleted, "c" added: fall back to first element of the new list
    catalog.apply_snapshot(vec![
        product("c", "Charlie", "2026-01-12"),
        product("a", "Alpha", "2026-01-10"),
    ]);
    assert_eq!(catalog.active().unwrap().id, "c");

    // Everything deleted: selection clears
    catalog.apply_snapshot(Vec::new());
    assert!(catalog.active().is_none());

    // Catalog refills: first element becomes active again
    catalog.apply_snapshot(vec![product("d", "Delta", "2026-01-13")]);
    assert_eq!(catalog.active().unwrap().id, "d");
}

// ============================================================================
// Batch Plan Against Live Catalog
// ============================================================================

#[test]
fn edit_session_plan_round_trip() {
    let mut catalog = Catalog::new();
    catalog.apply_snapshot(default_products());

    // Edit session: drop product-2, rename product-1, add a new entry
    let mut desired: Vec<Product> = catalog
        .products()
        .iter()
        .filter(|p| p.id != "product-2")
        .cloned()
        .collect();
    desired[0].name = "NeoStream 2".into();
    desired.push(product(
        &Product::generate_id(1758000000000),
        "Fresh",
        &Product::today(),
    ));

    let plan = BatchPlan::compute(&catalog.ids(), &desired);
    assert_eq!(plan.deletes, vec!["product-2".to_string()]);
    assert_eq!(plan.upserts.len(), 3);

    // The echo snapshot is what actually lands in the catalog
    catalog.apply_snapshot(desired);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.get("product-1").unwrap().name, "NeoStream 2");
    assert!(catalog.get("product-2").is_none());
}

#[test]
fn plan_with_duplicate_desired_ids_still_permutes_remote() {
    // A desired list repeating an id upserts it twice; last write wins
    let current = vec!["x".to_string()];
    let desired = vec![product("x", "First", ""), product("x", "Second", "")];

    let plan = BatchPlan::compute(&current, &desired);
    assert!(plan.deletes.is_empty());
    assert_eq!(plan.ops().len(), 2);
}

// ============================================================================
// Ordering Over Real Seed Data
// ============================================================================

#[test]
fn seed_data_sorts_newest_first() {
    let arranged = sort_by_date(&default_products());
    let ids: Vec<&str> = arranged.iter().map(|p| p.id.as_str()).collect();

    // 2026-01-18 (Lumina), 2026-01-15 (NeoStream), 2026-01-10 (Zenith AI)
    assert_eq!(ids, vec!["product-3", "product-1", "product-2"]);
}

#[test]
fn random_arrangement_preserves_catalog_contents() {
    let seed = default_products();
    let mut rng = StdRng::seed_from_u64(42);

    let arranged = prodlab_core::arrange(&seed, SortOrder::Random, &mut rng);

    let mut expected: Vec<&str> = seed.iter().map(|p| p.id.as_str()).collect();
    let mut got: Vec<&str> = arranged.iter().map(|p| p.id.as_str()).collect();
    expected.sort_unstable();
    got.sort_unstable();
    assert_eq!(got, expected);
}

// ============================================================================
// String Edge Cases
// ============================================================================

#[test]
fn unicode_product_fields_round_trip() {
    let names = ["日本語テスト", "Привет мир", "🎉🚀💯", "Hello\nWorld\tTab"];

    for (i, name) in names.iter().enumerate() {
        let p = product(&format!("item-{i}"), name, "2026-01-10");
        let json = serde_json::to_string(&p).unwrap();
        let parsed: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, *name);
    }
}

#[test]
fn empty_string_dates_sort_last() {
    let arranged = sort_by_date(&[
        product("undated", "Undated", ""),
        product("dated", "Dated", "2026-02-01"),
    ]);

    assert_eq!(arranged.last().unwrap().id, "undated");
}
