//! Change detection between two successive snapshots of a table.
//!
//! ## Entry points
//!
//! ```ignore
//! use sheetdb_core::diff::{detect_changes, render_change_message};
//!
//! let changes = detect_changes(previous.as_ref(), Some(&current), &profile);
//! let line = render_change_message(&changes, Lang::En);
//! ```
//!
//! ## Policies
//!
//! - **Absence is not deletion**: an empty or missing new dataset reports no
//!   changes at all, never an all-removed set.
//! - **First sight**: with no previous dataset every new entry is "added".
//! - **Identity collisions**: the last record with a given identity wins; no
//!   error is raised.

pub mod digest;
pub mod engine;
pub mod human_summary;
pub mod identity;
pub mod model;

pub use engine::{detect_changes, detect_record_changes, detect_settings_changes};
pub use human_summary::{render_change_details, render_change_log, render_change_message};
pub use model::{ChangeLog, ChangeLogEntry, ChangeSet, Classification, ModifiedEntry};
