//! Snapshot backends.

mod json_file;
mod sqlite;

pub use json_file::JsonFileSnapshotBackend;
pub use sqlite::SqliteSnapshotBackend;

use crate::errors::Result;
use sheetdb_core::errors::{ExError, ExErrorKind};
use sheetdb_core::snapshot::SnapshotBackend;
use std::path::Path;
use std::str::FromStr;

/// Which durable backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Json,
}

impl FromStr for StoreKind {
    type Err = ExError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "json" => Ok(StoreKind::Json),
            other => Err(ExError::new(ExErrorKind::InvalidConfig)
                .with_op("parse_store_kind")
                .with_message(format!("unknown store kind '{}'", other))),
        }
    }
}

/// Open the backend of the given kind at `path`.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn open_backend(kind: StoreKind, path: &Path) -> Result<Box<dyn SnapshotBackend>> {
    let backend: Box<dyn SnapshotBackend> = match kind {
        StoreKind::Sqlite => Box::new(SqliteSnapshotBackend::open(path)?),
        StoreKind::Json => Box::new(JsonFileSnapshotBackend::new(path)),
    };
    Ok(backend)
}
