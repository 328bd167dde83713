//! Human-readable rendering of change sets and change logs.

use crate::diff::model::{ChangeLog, ChangeSet, ModifiedEntry};
use crate::locale::Lang;

const SEPARATOR: &str = " · ";

struct Phrases {
    added: &'static str,
    modified: &'static str,
    removed: &'static str,
    no_changes: &'static str,
    all_up_to_date: &'static str,
}

fn phrases(lang: Lang) -> &'static Phrases {
    const EN: Phrases = Phrases {
        added: "new",
        modified: "updated",
        removed: "removed",
        no_changes: "No changes",
        all_up_to_date: "All data up to date",
    };
    const TR: Phrases = Phrases {
        added: "yeni",
        modified: "güncellendi",
        removed: "silindi",
        no_changes: "Değişiklik yok",
        all_up_to_date: "Tüm veriler güncel",
    };
    match lang {
        Lang::En => &EN,
        Lang::Tr => &TR,
    }
}

/// One-line summary of a change set.
///
/// Non-zero parts only, in the order added, modified, removed, joined with
/// `" · "`. A change set with nothing in it renders as `"✓ No changes"`.
///
/// ```
/// # use sheetdb_core::diff::{render_change_message, ChangeSet};
/// # use sheetdb_core::locale::Lang;
/// let changes = ChangeSet { added: vec!["A3".into()], ..ChangeSet::default() };
/// assert_eq!(render_change_message(&changes, Lang::En), "+1 new");
/// ```
pub fn render_change_message(changes: &ChangeSet, lang: Lang) -> String {
    let p = phrases(lang);
    let mut parts = Vec::with_capacity(3);

    if !changes.added.is_empty() {
        parts.push(format!("+{} {}", changes.added.len(), p.added));
    }
    if !changes.modified.is_empty() {
        parts.push(format!("{} {}", changes.modified.len(), p.modified));
    }
    if !changes.removed.is_empty() {
        parts.push(format!("{} {}", changes.removed.len(), p.removed));
    }

    if parts.is_empty() {
        format!("✓ {}", p.no_changes)
    } else {
        parts.join(SEPARATOR)
    }
}

/// Itemized listing of a change set, one line per entry.
///
/// `+` added, `~` modified, `-` removed. Record modifications list their
/// changed fields; settings modifications show old and new values.
pub fn render_change_details(changes: &ChangeSet) -> String {
    let mut out = String::new();
    for title in &changes.added {
        out.push_str(&format!("  + {title}\n"));
    }
    for entry in &changes.modified {
        match entry {
            ModifiedEntry::Record { title, fields } if fields.is_empty() => {
                out.push_str(&format!("  ~ {title}\n"));
            }
            ModifiedEntry::Record { title, fields } => {
                out.push_str(&format!("  ~ {title} ({})\n", fields.join(", ")));
            }
            ModifiedEntry::Setting {
                title,
                old_value,
                new_value,
            } => {
                out.push_str(&format!("  ~ {title}: {old_value} → {new_value}\n"));
            }
        }
    }
    for title in &changes.removed {
        out.push_str(&format!("  - {title}\n"));
    }
    out
}

/// Change-log panel text.
///
/// `"No changes"` when the log has no entries, `"All data up to date"` when
/// no entry changed, otherwise one line per changed table:
/// `<table>: <message> (<HH:MM:SS>)`.
pub fn render_change_log(log: &ChangeLog, lang: Lang) -> String {
    let p = phrases(lang);
    if log.is_empty() {
        return format!("{}\n", p.no_changes);
    }
    if !log.has_changes() {
        return format!("{}\n", p.all_up_to_date);
    }

    let mut out = String::new();
    for entry in log.changed_entries() {
        out.push_str(&format!(
            "{}: {} ({})\n",
            entry.table,
            entry.message,
            entry.timestamp.format("%H:%M:%S")
        ));
    }
    out
}
