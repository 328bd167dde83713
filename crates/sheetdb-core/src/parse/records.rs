//! Header-driven projection of rows into records.

use crate::model::record::strip_one_quote_layer;
use crate::model::{HeaderKey, Record};
use crate::parse::delimited::Row;

/// Project rows into records, row 0 being the header.
///
/// Columns whose header normalizes to nothing are dropped. Ragged rows are
/// mapped by column index: surplus fields are ignored and missing ones read
/// as empty strings. Fewer than two rows yields no records.
pub fn project_records(rows: &[Row]) -> Vec<Record> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let headers: Vec<(usize, HeaderKey)> = header_row
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| HeaderKey::normalize(cell).map(|key| (idx, key)))
        .collect();

    data_rows
        .iter()
        .map(|values| {
            headers
                .iter()
                .map(|(idx, key)| {
                    let raw = values.get(*idx).map(String::as_str).unwrap_or("");
                    (key.as_str(), clean_value(raw))
                })
                .collect::<Record>()
        })
        .collect()
}

/// Strip one layer of literal surrounding quotes, then whitespace.
fn clean_value(raw: &str) -> &str {
    strip_one_quote_layer(raw).trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_rows;

    #[test]
    fn test_header_only_yields_nothing() {
        assert!(project_records(&parse_rows("id,name\n")).is_empty());
        assert!(project_records(&[]).is_empty());
    }

    #[test]
    fn test_projection_normalizes_headers_and_values() {
        let rows = parse_rows("ID, Title EN ,Name\n 7 ,'Quoted', Ada \n");
        let records = project_records(&rows);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["id", "title_en", "name"]);
        assert_eq!(r.get("id"), Some("7"));
        assert_eq!(r.get("title_en"), Some("Quoted"));
        assert_eq!(r.get("name"), Some("Ada"));
    }

    #[test]
    fn test_empty_header_column_is_dropped() {
        let rows = parse_rows("id,,name\n1,secret,A\n");
        let r = &project_records(&rows)[0];
        assert_eq!(r.len(), 2);
        assert!(r.iter().all(|(_, v)| v != "secret"));
    }

    #[test]
    fn test_ragged_rows() {
        let rows = parse_rows("id,name,code\n1\n2,B,C,extra\n");
        let records = project_records(&rows);
        assert_eq!(records[0].get("name"), Some(""));
        assert_eq!(records[0].get("code"), Some(""));
        assert_eq!(records[1].get("code"), Some("C"));
        assert_eq!(records[1].len(), 3);
    }

    #[test]
    fn test_duplicate_header_keeps_first_position_last_value() {
        let rows = parse_rows("name,id,name\nA,1,B\n");
        let r = &project_records(&rows)[0];
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(r.get("name"), Some("B"));
    }
}
