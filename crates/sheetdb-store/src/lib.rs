//! sheetdb store - durable snapshot backends
//!
//! Provides:
//! - SQLite backend with an embedded, checksummed migrations framework
//! - Single-file JSON backend written atomically (temp file, then rename)

pub mod backend;
pub mod db;
pub mod errors;
pub mod fs;
pub mod migrations;

pub use backend::{open_backend, JsonFileSnapshotBackend, SqliteSnapshotBackend, StoreKind};
pub use errors::Result;
