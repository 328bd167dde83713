//! Change detection output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of changed field names reported per modified record.
pub const MAX_CHANGED_FIELDS: usize = 3;

/// Differences for one table between the previous and current snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Display titles of entries present only in the new dataset
    pub added: Vec<String>,
    /// Display titles of entries present only in the old dataset
    pub removed: Vec<String>,
    pub modified: Vec<ModifiedEntry>,
    /// Entries present on both sides with identical content
    pub unchanged: usize,
}

impl ChangeSet {
    /// True when nothing was added, removed or modified.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }

    /// Single-word classification, first matching rule wins:
    ///
    /// 1. only additions -> `Added`
    /// 2. only removals -> `Removed`
    /// 3. any modification -> `Modified`
    /// 4. otherwise -> `Unchanged`
    ///
    /// A set with both additions and removals but no modification therefore
    /// classifies as `Unchanged`.
    pub fn classification(&self) -> Classification {
        let added = !self.added.is_empty();
        let removed = !self.removed.is_empty();
        let modified = !self.modified.is_empty();

        if added && !modified && !removed {
            Classification::Added
        } else if removed && !added && !modified {
            Classification::Removed
        } else if modified {
            Classification::Modified
        } else {
            Classification::Unchanged
        }
    }
}

/// One entry present on both sides whose content differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModifiedEntry {
    /// A record, with up to [`MAX_CHANGED_FIELDS`] changed field names
    Record { title: String, fields: Vec<String> },
    /// A settings key with both values
    Setting {
        title: String,
        old_value: String,
        new_value: String,
    },
}

impl ModifiedEntry {
    pub fn title(&self) -> &str {
        match self {
            ModifiedEntry::Record { title, .. } | ModifiedEntry::Setting { title, .. } => title,
        }
    }
}

/// Overall change type of a table for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Added => "added",
            Classification::Removed => "removed",
            Classification::Modified => "modified",
            Classification::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one load cycle reported for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub table: String,
    pub classification: Classification,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub changes: ChangeSet,
}

/// Change log of the most recent load cycle. Rebuilt from scratch each cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChangeLogEntry) {
        self.entries.push(entry);
    }

    /// True if any table reported something other than `unchanged`.
    pub fn has_changes(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.classification != Classification::Unchanged)
    }

    pub fn changed_entries(&self) -> impl Iterator<Item = &ChangeLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.classification != Classification::Unchanged)
    }

    pub fn get(&self, table: &str) -> Option<&ChangeLogEntry> {
        self.entries.iter().find(|e| e.table == table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChangeLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
