//! Data model: records, datasets, and per-table profiles.

pub mod catalog;
pub mod dataset;
pub mod profile;
pub mod record;

pub use catalog::TableCatalog;
pub use dataset::{Dataset, Settings};
pub use profile::{TableKind, TableProfile};
pub use record::{HeaderKey, Record};
