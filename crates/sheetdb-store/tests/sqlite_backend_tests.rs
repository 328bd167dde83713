#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::sample_document;
use sheetdb_core::{Dataset, SnapshotBackend, SnapshotDocument};
use sheetdb_store::SqliteSnapshotBackend;
use tempfile::TempDir;

#[test]
fn test_fresh_database_has_no_snapshot() {
    let backend = SqliteSnapshotBackend::open_in_memory().unwrap();
    assert!(backend.load().unwrap().is_none());
}

#[test]
fn test_save_then_load_preserves_document() {
    let mut backend = SqliteSnapshotBackend::open_in_memory().unwrap();
    let doc = sample_document();

    backend.save(&doc).unwrap();
    let loaded = backend.load().unwrap().unwrap();

    assert_eq!(loaded, doc);
    // empty tables keep their kind through storage
    assert!(matches!(loaded.get("Team"), Some(Dataset::Records(r)) if r.is_empty()));
}

#[test]
fn test_save_replaces_previous_tables() {
    let mut backend = SqliteSnapshotBackend::open_in_memory().unwrap();
    backend.save(&sample_document()).unwrap();

    let mut smaller = SnapshotDocument::new(chrono::Utc::now());
    smaller.insert("News", Dataset::Records(vec![]));
    backend.save(&smaller).unwrap();

    let loaded = backend.load().unwrap().unwrap();
    let keys: Vec<&String> = loaded.tables.keys().collect();
    assert_eq!(keys, vec!["News"]);
}

#[test]
fn test_clear_drops_everything() {
    let mut backend = SqliteSnapshotBackend::open_in_memory().unwrap();
    backend.save(&sample_document()).unwrap();
    backend.clear().unwrap();
    assert!(backend.load().unwrap().is_none());
}

#[test]
fn test_snapshot_persists_across_connections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshots.db");
    let doc = sample_document();

    {
        let mut backend = SqliteSnapshotBackend::open(&path).unwrap();
        backend.save(&doc).unwrap();
    }

    let reopened = SqliteSnapshotBackend::open(&path).unwrap();
    assert_eq!(reopened.load().unwrap().unwrap(), doc);
}

#[test]
fn test_corrupt_payload_is_serialization_error() {
    let mut backend = SqliteSnapshotBackend::open_in_memory().unwrap();
    backend.save(&sample_document()).unwrap();
    backend
        .connection()
        .execute(
            "UPDATE table_snapshots SET payload = 'not json' WHERE table_key = 'News'",
            [],
        )
        .unwrap();

    let err = backend.load().unwrap_err();
    assert_eq!(err.kind(), sheetdb_core::ExErrorKind::Serialization);
    assert_eq!(err.table(), Some("News"));
}
