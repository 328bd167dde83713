//! Per-table identity and title rules.
//!
//! Which fields identify a record, and which fields name it for humans, are
//! data supplied per table rather than rules hidden in the diff engine.

use serde::{Deserialize, Serialize};

/// Fields probed, in order, to derive a record's identity.
pub const DEFAULT_IDENTITY_FIELDS: &[&str] =
    &["id", "name", "title", "title_en", "name_en", "company", "code"];

/// Fields probed, in order, to derive a record's display title.
pub const DEFAULT_TITLE_FIELDS: &[&str] = &[
    "title_tr", "title_en", "title", "name_tr", "name_en", "name", "company", "code", "id",
];

/// How a table's rows are projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// First row is the header; every later row is a record.
    Records,
    /// Headerless two-column key/value table.
    Settings,
}

/// Static description of one logical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableProfile {
    /// Logical table name (e.g. `news`)
    pub name: String,
    /// Sheet tab the payload comes from (e.g. `News`)
    pub tab: String,
    pub kind: TableKind,
    pub identity_fields: Vec<String>,
    pub title_fields: Vec<String>,
}

impl TableProfile {
    /// A records table with the default identity and title rules.
    pub fn records(name: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tab: tab.into(),
            kind: TableKind::Records,
            identity_fields: to_owned_list(DEFAULT_IDENTITY_FIELDS),
            title_fields: to_owned_list(DEFAULT_TITLE_FIELDS),
        }
    }

    /// The key/value settings table.
    pub fn settings(name: impl Into<String>, tab: impl Into<String>) -> Self {
        Self {
            kind: TableKind::Settings,
            ..Self::records(name, tab)
        }
    }

    pub fn with_identity_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.identity_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_title_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Key under which this table's snapshot is persisted: the table name
    /// with its first character upper-cased.
    pub fn snapshot_key(&self) -> String {
        capitalize(&self.name)
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_owned_list(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_key_capitalizes_first_char() {
        assert_eq!(TableProfile::records("news", "News").snapshot_key(), "News");
        assert_eq!(
            TableProfile::settings("settings", "Settings").snapshot_key(),
            "Settings"
        );
        assert_eq!(TableProfile::records("", "").snapshot_key(), "");
    }

    #[test]
    fn test_defaults_and_overrides() {
        let p = TableProfile::records("jobs", "Jobs");
        assert_eq!(p.identity_fields[0], "id");
        assert_eq!(p.title_fields[0], "title_tr");

        let p = p.with_identity_fields(["slug"]).with_title_fields(["headline"]);
        assert_eq!(p.identity_fields, vec!["slug".to_string()]);
        assert_eq!(p.title_fields, vec!["headline".to_string()]);
    }
}
