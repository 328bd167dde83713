use sheetdb_core::{Dataset, Record, TableCatalog, TableProfile};
use std::collections::HashMap;

/// Build a record from key/value pairs, in order.
#[allow(dead_code)]
pub fn rec(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}

#[allow(dead_code)]
pub fn records(rows: &[&[(&str, &str)]]) -> Dataset {
    Dataset::Records(rows.iter().map(|r| rec(r)).collect())
}

#[allow(dead_code)]
pub fn news_profile() -> TableProfile {
    TableProfile::records("news", "News")
}

/// Settings table plus `news` and `team`.
#[allow(dead_code)]
pub fn small_catalog() -> TableCatalog {
    TableCatalog::new(vec![
        TableProfile::settings("settings", "Settings"),
        TableProfile::records("news", "News"),
        TableProfile::records("team", "Team"),
    ])
    .unwrap()
}

#[allow(dead_code)]
pub fn payloads(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
