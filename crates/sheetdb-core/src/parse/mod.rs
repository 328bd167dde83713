//! Delimited-text parsing and projection into datasets.
//!
//! Parsing (text to rows) and projection (rows to records or settings) are
//! separate steps: a payload always parses to some rows, and projection
//! decides what those rows mean for a given table kind.

pub mod delimited;
pub mod records;
pub mod settings;

pub use delimited::{parse_rows, repair_encoding, rows_to_string, write_row, Row};
pub use records::project_records;
pub use settings::project_settings;

use crate::model::{Dataset, TableKind};

/// Parse a raw payload and project it according to the table kind.
pub fn parse_table(text: &str, kind: TableKind) -> Dataset {
    let rows = parse_rows(text);
    match kind {
        TableKind::Records => Dataset::Records(project_records(&rows)),
        TableKind::Settings => Dataset::Settings(project_settings(&rows)),
    }
}
