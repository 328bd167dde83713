//! Persisted snapshot of the previous load cycle.
//!
//! The document is the whole unit of persistence: backends load it, overwrite
//! it in full, or drop it. Partial writes are not part of the contract.

pub mod backend;
pub mod document;

pub use backend::{MemorySnapshotBackend, SnapshotBackend};
pub use document::SnapshotDocument;
