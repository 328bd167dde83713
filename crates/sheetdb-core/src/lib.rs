//! sheetdb core - ingestion and change detection for spreadsheet-backed sites
//!
//! This crate provides:
//! - A delimited-text parser tolerant of real-world exports
//! - Record and settings projectors with header normalization
//! - Per-table identity and title profiles
//! - A change detector with a stable, human-presentable report
//! - The ingestion session that owns snapshots across load cycles
//!
//! No network access happens here; payloads arrive as text and snapshots
//! leave through a [`snapshot::SnapshotBackend`].

pub mod diff;
pub mod errors;
pub mod locale;
pub mod logging_facility;
pub mod model;
pub mod parse;
pub mod session;
pub mod snapshot;

// Used by the logging macros
pub use sheetdb_core_types;

// Re-export commonly used types
pub use diff::{ChangeLog, ChangeLogEntry, ChangeSet, Classification, ModifiedEntry};
pub use errors::{ExError, ExErrorKind, Result, SheetDbError};
pub use locale::Lang;
pub use model::{Dataset, Record, Settings, TableCatalog, TableKind, TableProfile};
pub use session::{CycleReport, IngestionSession, TableStatus};
pub use snapshot::{MemorySnapshotBackend, SnapshotBackend, SnapshotDocument};
