use chrono::{TimeZone, Utc};
use sheetdb_core::{Dataset, Record, Settings, SnapshotDocument};

/// Document with one records table and one settings table.
#[allow(dead_code)]
pub fn sample_document() -> SnapshotDocument {
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    let mut doc = SnapshotDocument::new(ts);
    let records: Vec<Record> = vec![
        [("id", "1"), ("title", "Launch")].into_iter().collect(),
        [("id", "2"), ("title", "Grant")].into_iter().collect(),
    ];
    doc.insert("News", Dataset::Records(records));
    doc.insert(
        "Settings",
        Dataset::Settings(Settings::from([("email".to_string(), "lab@x.org".to_string())])),
    );
    doc.insert("Team", Dataset::Records(vec![]));
    doc
}
