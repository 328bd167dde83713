//! Per-table datasets.

use crate::model::profile::TableKind;
use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flattened key/value mapping of the settings table.
pub type Settings = BTreeMap<String, String>;

/// The projected content of one table.
///
/// Serialized untagged: a records table is a JSON array of objects, the
/// settings table a single JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dataset {
    Records(Vec<Record>),
    Settings(Settings),
}

impl Dataset {
    /// An empty dataset of the given kind.
    pub fn empty(kind: TableKind) -> Self {
        match kind {
            TableKind::Records => Dataset::Records(Vec::new()),
            TableKind::Settings => Dataset::Settings(Settings::new()),
        }
    }

    pub fn kind(&self) -> TableKind {
        match self {
            Dataset::Records(_) => TableKind::Records,
            Dataset::Settings(_) => TableKind::Settings,
        }
    }

    /// Number of records, or number of keys for settings.
    pub fn len(&self) -> usize {
        match self {
            Dataset::Records(r) => r.len(),
            Dataset::Settings(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_records(&self) -> Option<&[Record]> {
        match self {
            Dataset::Records(r) => Some(r),
            Dataset::Settings(_) => None,
        }
    }

    pub fn as_settings(&self) -> Option<&Settings> {
        match self {
            Dataset::Settings(s) => Some(s),
            Dataset::Records(_) => None,
        }
    }
}
