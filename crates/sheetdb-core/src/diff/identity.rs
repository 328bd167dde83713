//! Record identity and display titles.

use crate::model::{Record, TableProfile};

/// Characters of canonical JSON used as identity when no identity field has a value.
pub const IDENTITY_FALLBACK_CHARS: usize = 50;

/// Longest display title kept before truncation.
pub const TITLE_MAX_CHARS: usize = 30;

/// Placeholder title for records with no title field.
pub const UNKNOWN_TITLE: &str = "?";

/// Identity of a record under the given profile.
///
/// First non-empty identity field, otherwise the first
/// [`IDENTITY_FALLBACK_CHARS`] characters of the canonical JSON. Two
/// records may share an identity; callers resolve that last-write-wins.
pub fn record_identity(record: &Record, profile: &TableProfile) -> String {
    match record.first_non_empty(&profile.identity_fields) {
        Some(id) => id.to_string(),
        None => record
            .to_canonical_json()
            .chars()
            .take(IDENTITY_FALLBACK_CHARS)
            .collect(),
    }
}

/// Human-readable title: first non-empty title field or `"?"`, truncated to
/// [`TITLE_MAX_CHARS`] characters with `"..."` appended when longer.
pub fn display_title(record: &Record, profile: &TableProfile) -> String {
    let raw = record
        .first_non_empty(&profile.title_fields)
        .unwrap_or(UNKNOWN_TITLE);
    truncate_title(raw)
}

pub(crate) fn truncate_title(raw: &str) -> String {
    if raw.chars().count() > TITLE_MAX_CHARS {
        let mut out: String = raw.chars().take(TITLE_MAX_CHARS).collect();
        out.push_str("...");
        out
    } else {
        raw.to_string()
    }
}
