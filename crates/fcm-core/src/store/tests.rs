//! Tests for the SQLite token registry (use in-memory DB helper from db).

use tokio_util::sync::CancellationToken;

use super::db::open_memory;
use super::{Store, StoreError, TokenDb};

#[tokio::test]
async fn add_list_remove_tokens() {
    let db = open_memory().await.unwrap();
    assert!(db.list_tokens().await.unwrap().is_empty());

    assert!(db.add_token("16").await.unwrap());
    assert!(db.add_token("4").await.unwrap());
    assert!(!db.add_token("4").await.unwrap());

    // Sorted, not insertion order.
    assert_eq!(db.list_tokens().await.unwrap(), vec!["16", "4"]);

    assert!(db.remove_token("16").await.unwrap());
    assert!(!db.remove_token("16").await.unwrap());
    assert_eq!(db.list_tokens().await.unwrap(), vec!["4"]);
}

#[tokio::test]
async fn rename_moves_token() {
    let db = open_memory().await.unwrap();
    db.add_token("23").await.unwrap();
    db.rename_token("23", "32").await.unwrap();
    assert!(!db.contains("23").await.unwrap());
    assert!(db.contains("32").await.unwrap());
}

#[tokio::test]
async fn rename_onto_existing_token_merges() {
    let db = open_memory().await.unwrap();
    db.add_token("old").await.unwrap();
    db.add_token("new").await.unwrap();
    db.rename_token("old", "new").await.unwrap();
    assert_eq!(db.list_tokens().await.unwrap(), vec!["new"]);
}

#[tokio::test]
async fn rename_unknown_token_is_not_found_and_changes_nothing() {
    let db = open_memory().await.unwrap();
    db.add_token("a").await.unwrap();
    let err = db.rename_token("missing", "b").await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(t) if t == "missing"));
    assert_eq!(db.list_tokens().await.unwrap(), vec!["a"]);
}

#[tokio::test]
async fn store_trait_delete_tolerates_unknown_token() {
    let db = open_memory().await.unwrap();
    let cancel = CancellationToken::new();
    db.delete(&cancel, "never-added").await.unwrap();
}

#[tokio::test]
async fn store_trait_respects_cancellation() {
    let db = open_memory().await.unwrap();
    db.add_token("a").await.unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();
    assert!(matches!(
        db.rename(&cancel, "a", "b").await,
        Err(StoreError::Cancelled)
    ));
    assert!(db.contains("a").await.unwrap());
}

#[tokio::test]
async fn open_at_creates_file_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tokens.db");
    {
        let db = TokenDb::open_at(&path).await.unwrap();
        db.add_token("persisted").await.unwrap();
    }
    assert!(path.exists());
    let db = TokenDb::open_at(&path).await.unwrap();
    assert_eq!(db.list_tokens().await.unwrap(), vec!["persisted"]);
}
