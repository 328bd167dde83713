//! Change detection engine.
//!
//! The entry point is [`detect_changes`], which dispatches on the table kind
//! to [`detect_record_changes`] or [`detect_settings_changes`].

use crate::diff::digest::record_hash;
use crate::diff::identity::{display_title, record_identity};
use crate::diff::model::{ChangeSet, ModifiedEntry, MAX_CHANGED_FIELDS};
use crate::model::{Dataset, Record, Settings, TableKind, TableProfile};
use std::collections::HashMap;

/// Compare two successive datasets of one table.
///
/// A dataset of the wrong kind for the profile is treated as absent.
pub fn detect_changes(
    old: Option<&Dataset>,
    new: Option<&Dataset>,
    profile: &TableProfile,
) -> ChangeSet {
    match profile.kind {
        TableKind::Records => detect_record_changes(
            old.and_then(Dataset::as_records),
            new.and_then(Dataset::as_records),
            profile,
        ),
        TableKind::Settings => detect_settings_changes(
            old.and_then(Dataset::as_settings),
            new.and_then(Dataset::as_settings),
        ),
    }
}

/// Compare two record lists by identity and content hash.
///
/// - new absent or empty: no changes (absence is never deletion)
/// - old absent: every new record is added, titles in new order
/// - otherwise added and modified follow new order, removed follows old order
pub fn detect_record_changes(
    old: Option<&[Record]>,
    new: Option<&[Record]>,
    profile: &TableProfile,
) -> ChangeSet {
    let new = match new {
        Some(records) if !records.is_empty() => records,
        _ => return ChangeSet::default(),
    };

    let Some(old) = old else {
        return ChangeSet {
            added: new.iter().map(|r| display_title(r, profile)).collect(),
            ..ChangeSet::default()
        };
    };

    let old_index = IdentityIndex::build(old, profile);
    let new_index = IdentityIndex::build(new, profile);

    let mut changes = ChangeSet::default();

    for (id, new_entry) in new_index.iter() {
        match old_index.get(id) {
            None => changes.added.push(display_title(new_entry.record, profile)),
            Some(old_entry) if old_entry.hash != new_entry.hash => {
                changes.modified.push(ModifiedEntry::Record {
                    title: display_title(new_entry.record, profile),
                    fields: changed_fields(old_entry.record, new_entry.record),
                });
            }
            Some(_) => changes.unchanged += 1,
        }
    }

    for (id, old_entry) in old_index.iter() {
        if new_index.get(id).is_none() {
            changes
                .removed
                .push(display_title(old_entry.record, profile));
        }
    }

    changes
}

/// Compare two settings maps key by key. Modified entries carry both values.
///
/// - new absent or empty: no changes
/// - old absent or empty: every new key is added
pub fn detect_settings_changes(old: Option<&Settings>, new: Option<&Settings>) -> ChangeSet {
    let new = match new {
        Some(settings) if !settings.is_empty() => settings,
        _ => return ChangeSet::default(),
    };

    let old = match old {
        Some(settings) if !settings.is_empty() => settings,
        _ => {
            return ChangeSet {
                added: new.keys().cloned().collect(),
                ..ChangeSet::default()
            }
        }
    };

    let mut changes = ChangeSet::default();

    for (key, new_value) in new {
        match old.get(key) {
            None => changes.added.push(key.clone()),
            Some(old_value) if old_value != new_value => {
                changes.modified.push(ModifiedEntry::Setting {
                    title: key.clone(),
                    old_value: old_value.clone(),
                    new_value: new_value.clone(),
                });
            }
            Some(_) => changes.unchanged += 1,
        }
    }

    changes.removed = old
        .keys()
        .filter(|key| !new.contains_key(*key))
        .cloned()
        .collect();

    changes
}

/// Field names whose values differ, over the union of keys (old order, then
/// keys only the new record has), capped at [`MAX_CHANGED_FIELDS`].
fn changed_fields(old: &Record, new: &Record) -> Vec<String> {
    let new_only = new.keys().filter(|k| old.get(k).is_none());
    old.keys()
        .chain(new_only)
        .filter(|k| old.get(k) != new.get(k))
        .take(MAX_CHANGED_FIELDS)
        .map(str::to_string)
        .collect()
}

struct IndexEntry<'a> {
    record: &'a Record,
    hash: String,
}

/// Identity -> record map that keeps first-insertion order while letting a
/// later record with the same identity replace the earlier one in place.
struct IdentityIndex<'a> {
    order: Vec<(String, IndexEntry<'a>)>,
    positions: HashMap<String, usize>,
}

impl<'a> IdentityIndex<'a> {
    fn build(records: &'a [Record], profile: &TableProfile) -> Self {
        let mut index = Self {
            order: Vec::with_capacity(records.len()),
            positions: HashMap::with_capacity(records.len()),
        };
        for record in records {
            let id = record_identity(record, profile);
            let entry = IndexEntry {
                record,
                hash: record_hash(record),
            };
            match index.positions.get(&id) {
                Some(&pos) => index.order[pos].1 = entry,
                None => {
                    index.positions.insert(id.clone(), index.order.len());
                    index.order.push((id, entry));
                }
            }
        }
        index
    }

    fn get(&self, id: &str) -> Option<&IndexEntry<'a>> {
        self.positions.get(id).map(|&pos| &self.order[pos].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &IndexEntry<'a>)> {
        self.order.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    fn profile() -> TableProfile {
        TableProfile::records("news", "News")
    }

    #[test]
    fn test_changed_fields_union_and_cap() {
        let old = rec(&[("id", "1"), ("a", "x"), ("b", "x"), ("c", "x")]);
        let new = rec(&[("id", "1"), ("a", "y"), ("b", "y"), ("c", "y"), ("d", "new")]);
        assert_eq!(changed_fields(&old, &new), vec!["a", "b", "c"]);

        let old = rec(&[("id", "1")]);
        let new = rec(&[("id", "1"), ("extra", "v")]);
        assert_eq!(changed_fields(&old, &new), vec!["extra"]);
    }

    #[test]
    fn test_changed_fields_removed_column() {
        let old = rec(&[("id", "1"), ("gone", "v")]);
        let new = rec(&[("id", "1")]);
        assert_eq!(changed_fields(&old, &new), vec!["gone"]);
    }

    #[test]
    fn test_duplicate_identity_last_wins_in_first_position() {
        let records = vec![
            rec(&[("id", "1"), ("name", "first")]),
            rec(&[("id", "2"), ("name", "other")]),
            rec(&[("id", "1"), ("name", "second")]),
        ];
        let p = profile();
        let index = IdentityIndex::build(&records, &p);
        let ids: Vec<&str> = index.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(index.get("1").unwrap().record.get("name"), Some("second"));
    }

    #[test]
    fn test_wrong_kind_old_is_treated_as_absent() {
        let p = profile();
        let old = Dataset::Settings(Settings::from([("k".to_string(), "v".to_string())]));
        let new = Dataset::Records(vec![rec(&[("id", "1"), ("title", "T")])]);
        let changes = detect_changes(Some(&old), Some(&new), &p);
        assert_eq!(changes.added, vec!["T"]);
    }
}
