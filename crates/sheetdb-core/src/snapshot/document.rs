//! Snapshot document type.

use crate::errors::Result;
use crate::model::Dataset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Previous-cycle dataset per table, keyed by snapshot key (`News`, `Settings`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tables: BTreeMap<String, Dataset>,
}

impl SnapshotDocument {
    pub fn new(saved_at: DateTime<Utc>) -> Self {
        Self {
            saved_at: Some(saved_at),
            tables: BTreeMap::new(),
        }
    }

    pub fn get(&self, snapshot_key: &str) -> Option<&Dataset> {
        self.tables.get(snapshot_key)
    }

    pub fn insert(&mut self, snapshot_key: impl Into<String>, dataset: Dataset) {
        self.tables.insert(snapshot_key.into(), dataset);
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Serialize to the JSON text stored by file and row backends.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a document previously written by [`to_json`](Self::to_json).
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::Serialization` on malformed JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
