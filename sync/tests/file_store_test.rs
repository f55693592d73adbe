//! Integration tests for the file-backed document store.

use prodlab_sync::{DocumentStore, FileStore, SyncError};
use serde_json::json;

#[tokio::test]
async fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("store.json")).await.unwrap();

    assert!(store.get_all("products").await.unwrap().is_empty());
}

#[tokio::test]
async fn flush_and_reopen_round_trips_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    let store = FileStore::open(&path).await.unwrap();
    store
        .upsert("products", "p1", json!({"name": "NeoStream"}))
        .await
        .unwrap();
    store
        .upsert("settings", "app", json!({"sortOrder": "random"}))
        .await
        .unwrap();
    store.flush().await.unwrap();

    let reopened = FileStore::open(&path).await.unwrap();
    let products = reopened.get_all("products").await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].fields, json!({"name": "NeoStream"}));
    assert_eq!(
        reopened.get_one("settings", "app").await.unwrap(),
        Some(json!({"sortOrder": "random"}))
    );
}

#[tokio::test]
async fn flush_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("store.json");

    let store = FileStore::open(&path).await.unwrap();
    store.flush().await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn rejects_future_format_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(
        &path,
        r#"{"formatVersion": 999, "collections": {}}"#,
    )
    .unwrap();

    let result = FileStore::open(&path).await;
    assert!(matches!(result, Err(SyncError::InvalidStoreFile(_))));
}

#[tokio::test]
async fn rejects_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "not json at all").unwrap();

    let result = FileStore::open(&path).await;
    assert!(matches!(result, Err(SyncError::InvalidStoreFile(_))));
}
