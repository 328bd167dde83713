//! Site configuration file (TOML).
//!
//! ```toml
//! mode = "single"
//! sheet_id = "1AbC..."
//! default_lang = "tr"
//!
//! [tabs]
//! settings = "Settings"
//! news = "News"
//!
//! [tables.news]
//! identity_fields = ["id", "slug"]
//! ```
//!
//! With no `[tabs]` table the default site catalog is used.

use serde::Deserialize;
use sheetdb_core::errors::{ExError, ExErrorKind, Result};
use sheetdb_core::model::catalog::DEFAULT_RECORD_TABLES;
use sheetdb_core::{Lang, TableCatalog, TableProfile};
use sheetdb_engine::{SheetRef, SheetSource};
use std::collections::BTreeMap;
use std::path::Path;

const SETTINGS_TABLE: &str = "settings";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    #[default]
    Single,
    Multi,
}

/// Per-table identity and title overrides
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableOverride {
    pub identity_fields: Option<Vec<String>>,
    pub title_fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default)]
    pub mode: SourceMode,
    #[serde(default)]
    pub sheet_id: Option<String>,
    #[serde(default)]
    pub default_lang: Lang,
    /// Logical table name -> sheet tab name
    #[serde(default)]
    pub tabs: BTreeMap<String, String>,
    #[serde(default)]
    pub sheets: Vec<SheetRef>,
    #[serde(default)]
    pub tables: BTreeMap<String, TableOverride>,
}

fn config_error(message: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::InvalidConfig)
        .with_op("load_config")
        .with_message(message)
}

impl SiteConfig {
    /// Read and parse a site file.
    ///
    /// # Errors
    ///
    /// `Io` if the file is unreadable, `InvalidConfig` if it is not valid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_message(format!("{}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| config_error(e.to_string()))
    }

    /// Tables to load, in load order: known site tables first, then any
    /// extra tables alphabetically.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when an override names a table that is not loaded.
    pub fn catalog(&self) -> Result<TableCatalog> {
        let base = if self.tabs.is_empty() {
            TableCatalog::default_site().iter().cloned().collect()
        } else {
            self.profiles_from_tabs()
        };

        let mut profiles = Vec::with_capacity(base.len());
        for mut profile in base {
            if let Some(o) = self.tables.get(&profile.name) {
                if let Some(fields) = &o.identity_fields {
                    profile = profile.with_identity_fields(fields);
                }
                if let Some(fields) = &o.title_fields {
                    profile = profile.with_title_fields(fields);
                }
            }
            profiles.push(profile);
        }

        if let Some(unknown) = self
            .tables
            .keys()
            .find(|name| !profiles.iter().any(|p| &p.name == *name))
        {
            return Err(config_error(format!(
                "override for table '{}' which is not loaded",
                unknown
            )));
        }

        TableCatalog::new(profiles)
    }

    fn profiles_from_tabs(&self) -> Vec<TableProfile> {
        let known = std::iter::once(SETTINGS_TABLE)
            .chain(DEFAULT_RECORD_TABLES.iter().copied())
            .filter(|name| self.tabs.contains_key(*name))
            .map(str::to_string);
        let extra = self
            .tabs
            .keys()
            .filter(|name| {
                name.as_str() != SETTINGS_TABLE && !DEFAULT_RECORD_TABLES.contains(&name.as_str())
            })
            .cloned();

        known
            .chain(extra)
            .filter_map(|name| {
                let tab = self.tabs.get(&name)?.clone();
                Some(if name == SETTINGS_TABLE {
                    TableProfile::settings(name, tab)
                } else {
                    TableProfile::records(name, tab)
                })
            })
            .collect()
    }

    /// Spreadsheet layout for the HTTP transport.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when single mode has no `sheet_id` or multi mode has
    /// no `[[sheets]]`.
    pub fn source(&self) -> Result<SheetSource> {
        match self.mode {
            SourceMode::Single => self
                .sheet_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .map(|sheet_id| SheetSource::Single { sheet_id })
                .ok_or_else(|| config_error("single mode requires sheet_id")),
            SourceMode::Multi if self.sheets.is_empty() => {
                Err(config_error("multi mode requires at least one [[sheets]] entry"))
            }
            SourceMode::Multi => Ok(SheetSource::Multi {
                sheets: self.sheets.clone(),
            }),
        }
    }
}
