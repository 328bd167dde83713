//! Ordered set of table profiles for a site.

use crate::errors::{Result, SheetDbError};
use crate::model::profile::{capitalize, TableKind, TableProfile};

/// Logical table names of the default site, in load order.
pub const DEFAULT_RECORD_TABLES: &[&str] = &[
    "news",
    "events",
    "faculty",
    "research",
    "publications",
    "courses",
    "projects",
    "labs",
    "jobs",
    "alumni",
    "partners",
    "students",
];

/// The tables a site loads on every cycle, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCatalog {
    tables: Vec<TableProfile>,
}

impl TableCatalog {
    /// Build a catalog, rejecting duplicate names, names sharing a snapshot
    /// key (`news` and `News`), and more than one settings table.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for a duplicate table or several settings tables.
    pub fn new(tables: Vec<TableProfile>) -> Result<Self> {
        for (i, t) in tables.iter().enumerate() {
            let earlier = &tables[..i];
            if earlier.iter().any(|o| o.name == t.name) {
                return Err(SheetDbError::DuplicateTable {
                    table: t.name.clone(),
                }
                .into());
            }
            let key = t.snapshot_key();
            if let Some(other) = earlier.iter().find(|o| o.snapshot_key() == key) {
                return Err(SheetDbError::SnapshotKeyCollision {
                    key,
                    first: other.name.clone(),
                    second: t.name.clone(),
                }
                .into());
            }
        }
        let settings_count = tables
            .iter()
            .filter(|t| t.kind == TableKind::Settings)
            .count();
        if settings_count > 1 {
            return Err(SheetDbError::AmbiguousSettingsTable {
                count: settings_count,
            }
            .into());
        }
        Ok(Self { tables })
    }

    /// The settings table followed by the twelve content tables, each
    /// read from a tab named after it.
    pub fn default_site() -> Self {
        let mut tables = vec![TableProfile::settings("settings", "Settings")];
        for name in DEFAULT_RECORD_TABLES {
            tables.push(TableProfile::records(*name, capitalize(name)));
        }
        Self { tables }
    }

    pub fn get(&self, name: &str) -> Option<&TableProfile> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Look up a table, failing with `NotFound` when absent.
    pub fn require(&self, name: &str) -> Result<&TableProfile> {
        self.get(name).ok_or_else(|| {
            SheetDbError::UnknownTable {
                table: name.to_string(),
            }
            .into()
        })
    }

    pub fn settings_table(&self) -> Option<&TableProfile> {
        self.tables.iter().find(|t| t.kind == TableKind::Settings)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableProfile> {
        self.tables.iter()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
