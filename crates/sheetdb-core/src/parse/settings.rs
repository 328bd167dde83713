//! Projection of the headerless key/value settings table.

use crate::model::Settings;
use crate::parse::delimited::Row;

/// Build the flat settings map.
///
/// Rows with fewer than two cells are skipped. When either cell holds line
/// breaks, both are split into lines and paired by position, the shorter side
/// padded with empty strings. Keys that are blank or equal to `key`
/// (case-insensitive) are skipped; later rows overwrite earlier ones.
pub fn project_settings(rows: &[Row]) -> Settings {
    let mut settings = Settings::new();

    for row in rows {
        let [key_cell, value_cell, ..] = row.as_slice() else {
            continue;
        };

        if has_line_break(key_cell) || has_line_break(value_cell) {
            let keys = split_lines(key_cell);
            let values = split_lines(value_cell);
            let count = keys.len().max(values.len());
            for i in 0..count {
                let key = keys.get(i).copied().unwrap_or("");
                let value = values.get(i).copied().unwrap_or("");
                insert_pair(&mut settings, key, value);
            }
        } else {
            insert_pair(&mut settings, key_cell, value_cell);
        }
    }

    settings
}

fn insert_pair(settings: &mut Settings, key: &str, value: &str) {
    let key = key.trim();
    if key.is_empty() || key.eq_ignore_ascii_case("key") {
        return;
    }
    settings.insert(key.to_string(), value.trim().to_string());
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Split on LF, CR or CRLF, keeping empty segments.
fn split_lines(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                out.push(&s[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            b'\n' => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    out.push(&s[start..]);
    out
}
