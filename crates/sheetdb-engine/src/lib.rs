//! sheetdb engine - async load cycles over a sheet transport
//!
//! Fetches every catalog table concurrently, then hands the payloads to an
//! [`IngestionSession`](sheetdb_core::IngestionSession) for parsing, change
//! detection and snapshot commit.

pub mod errors;
pub mod loader;
pub mod source;
pub mod transport;

pub use errors::TransportError;
pub use loader::{LoadOutcome, SiteLoader};
pub use source::{SheetRef, SheetSource};
pub use transport::{DirTransport, HttpTransport, SheetTransport};
