//! Where each tab's CSV export lives.

use crate::errors::TransportError;
use serde::{Deserialize, Serialize};
use url::form_urlencoded::byte_serialize;

pub const SHEETS_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// One spreadsheet and the tabs it holds (multi-sheet mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRef {
    pub id: String,
    pub tabs: Vec<String>,
}

/// Spreadsheet layout of a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SheetSource {
    /// Every tab lives in one spreadsheet
    Single { sheet_id: String },
    /// Tabs are spread over several spreadsheets; the first sheet listing a
    /// tab serves it
    Multi { sheets: Vec<SheetRef> },
}

impl SheetSource {
    /// Id of the spreadsheet that serves `tab`.
    ///
    /// # Errors
    ///
    /// `TransportError::UnknownTable` when no sheet lists the tab.
    pub fn sheet_for(&self, tab: &str) -> Result<&str, TransportError> {
        match self {
            SheetSource::Single { sheet_id } => Ok(sheet_id),
            SheetSource::Multi { sheets } => sheets
                .iter()
                .find(|s| s.tabs.iter().any(|t| t == tab))
                .map(|s| s.id.as_str())
                .ok_or_else(|| TransportError::UnknownTable {
                    tab: tab.to_string(),
                }),
        }
    }

    /// CSV export URL for `tab`, with a cache-busting token.
    ///
    /// # Errors
    ///
    /// `TransportError::UnknownTable` when no sheet lists the tab.
    pub fn csv_url(&self, tab: &str, cache_bust: i64) -> Result<String, TransportError> {
        let sheet_id = self.sheet_for(tab)?;
        let tab_param: String = byte_serialize(tab.as_bytes()).collect();
        Ok(format!(
            "{SHEETS_BASE_URL}/{sheet_id}/gviz/tq?tqx=out:csv&sheet={tab_param}&cb={cache_bust}"
        ))
    }
}
