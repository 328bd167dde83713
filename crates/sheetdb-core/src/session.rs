//! Ingestion session: the owned state of one running site.
//!
//! Holds the current datasets, the previous-cycle snapshot, the change log and
//! the loading flag. All mutation goes through methods on [`IngestionSession`].
//!
//! A cycle runs in four steps:
//!
//! 1. `begin_load()` claims the loading flag (false if a cycle is running)
//! 2. the caller fetches one payload per table
//! 3. `ingest_cycle(payloads, now)` parses, diffs, commits and persists
//! 4. `finish_load()` releases the flag

use crate::diff::{detect_changes, render_change_message, ChangeLog, ChangeLogEntry};
use crate::errors::{ExError, ExErrorKind, Result};
use crate::locale::Lang;
use crate::model::{Dataset, Settings, TableCatalog, TableKind};
use crate::parse::parse_table;
use crate::snapshot::{SnapshotBackend, SnapshotDocument};
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

/// Row or key count of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table: String,
    pub kind: TableKind,
    pub count: usize,
}

/// Outcome of one ingested load cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub finished_at: DateTime<Utc>,
    pub change_log: ChangeLog,
    pub tables: Vec<TableStatus>,
    /// False when the snapshot could not be written; in-memory state is
    /// still committed.
    pub persisted: bool,
}

impl CycleReport {
    pub fn has_changes(&self) -> bool {
        self.change_log.has_changes()
    }
}

pub struct IngestionSession {
    catalog: TableCatalog,
    backend: Box<dyn SnapshotBackend>,
    current: HashMap<String, Dataset>,
    previous: SnapshotDocument,
    change_log: ChangeLog,
    lang: Lang,
    loading: bool,
    ingested: bool,
    last_updated: Option<DateTime<Utc>>,
}

impl IngestionSession {
    /// Open a session, restoring the previous snapshot from `backend`.
    ///
    /// A snapshot that cannot be loaded is logged and treated as no history.
    pub fn open(catalog: TableCatalog, backend: Box<dyn SnapshotBackend>) -> Self {
        let previous = match backend.load() {
            Ok(Some(doc)) => doc,
            Ok(None) => SnapshotDocument::default(),
            Err(err) => {
                tracing::warn!(
                    op = "open_session",
                    err.code = err.code(),
                    "previous snapshot unreadable, starting without history: {}",
                    err
                );
                SnapshotDocument::default()
            }
        };

        let current = catalog
            .iter()
            .map(|p| (p.name.clone(), Dataset::empty(p.kind)))
            .collect();

        Self {
            last_updated: previous.saved_at,
            catalog,
            backend,
            current,
            previous,
            change_log: ChangeLog::new(),
            lang: Lang::default(),
            loading: false,
            ingested: false,
        }
    }

    /// Language used to render change messages.
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn set_lang(&mut self, lang: Lang) {
        self.lang = lang;
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn catalog(&self) -> &TableCatalog {
        &self.catalog
    }

    /// Claim the loading flag. Returns false if a cycle is already running.
    pub fn begin_load(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    pub fn finish_load(&mut self) {
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Run parse, projection, change detection and snapshot commit for one cycle.
    ///
    /// `payloads` maps table name to raw delimited text. A catalog table with
    /// no payload (its fetch failed) degrades to an empty dataset. Payloads for
    /// tables outside the catalog are ignored.
    ///
    /// Tables whose new dataset is empty get no change-log entry. The snapshot
    /// is replaced once, after every table is diffed, and covers every table.
    pub fn ingest_cycle(
        &mut self,
        payloads: &HashMap<String, String>,
        now: DateTime<Utc>,
    ) -> CycleReport {
        let start = Instant::now();
        log_op_start!("ingest_cycle", table_count = self.catalog.len());

        for name in payloads.keys() {
            if self.catalog.get(name).is_none() {
                tracing::warn!(op = "ingest_cycle", table = %name, "payload for unknown table ignored");
            }
        }

        let mut change_log = ChangeLog::new();
        let mut next = SnapshotDocument::new(now);

        for profile in self.catalog.iter() {
            let dataset = match payloads.get(&profile.name) {
                Some(text) => parse_table(text, profile.kind),
                None => Dataset::empty(profile.kind),
            };
            tracing::debug!(
                table = %profile.name,
                record_count = dataset.len(),
                "table projected"
            );

            let key = profile.snapshot_key();
            let changes = detect_changes(self.previous.get(&key), Some(&dataset), profile);

            if !dataset.is_empty() {
                change_log.push(ChangeLogEntry {
                    table: profile.name.clone(),
                    classification: changes.classification(),
                    message: render_change_message(&changes, self.lang),
                    timestamp: now,
                    changes,
                });
            }

            next.insert(key, dataset.clone());
            self.current.insert(profile.name.clone(), dataset);
        }

        let persisted = match self.backend.save(&next) {
            Ok(()) => true,
            Err(err) => {
                log_op_error!(
                    "save_snapshot",
                    ExError::new(ExErrorKind::Persistence)
                        .with_op("save_snapshot")
                        .with_message("snapshot kept in memory only")
                        .with_source(err),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                false
            }
        };

        self.previous = next;
        self.change_log = change_log;
        self.last_updated = Some(now);
        self.ingested = true;

        log_op_end!(
            "ingest_cycle",
            duration_ms = start.elapsed().as_millis() as u64,
            changed_tables = self.change_log.changed_entries().count()
        );

        CycleReport {
            finished_at: now,
            change_log: self.change_log.clone(),
            tables: self.data_status(),
            persisted,
        }
    }

    /// Current dataset of a table; empty until the first cycle.
    ///
    /// # Errors
    ///
    /// Returns `ExErrorKind::NotFound` for a table outside the catalog.
    pub fn dataset(&self, name: &str) -> Result<&Dataset> {
        let profile = self.catalog.require(name)?;
        self.current.get(&profile.name).ok_or_else(|| {
            ExError::new(ExErrorKind::Internal)
                .with_op("dataset")
                .with_table(name)
                .with_message("catalog table has no current dataset")
        })
    }

    /// Current settings map, if the catalog has a settings table.
    pub fn settings(&self) -> Option<&Settings> {
        let profile = self.catalog.settings_table()?;
        self.current.get(&profile.name)?.as_settings()
    }

    pub fn change_log(&self) -> &ChangeLog {
        &self.change_log
    }

    /// Time of the last committed cycle, restored from the snapshot on open.
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// The snapshot the next cycle will be compared against.
    pub fn previous_snapshot(&self) -> &SnapshotDocument {
        &self.previous
    }

    /// Per-table counts in catalog order.
    ///
    /// Before the first cycle the counts come from the restored snapshot.
    pub fn data_status(&self) -> Vec<TableStatus> {
        self.catalog
            .iter()
            .map(|profile| {
                let dataset = if self.ingested {
                    self.current.get(&profile.name)
                } else {
                    self.previous.get(&profile.snapshot_key())
                };
                TableStatus {
                    table: profile.name.clone(),
                    kind: profile.kind,
                    count: dataset.map_or(0, Dataset::len),
                }
            })
            .collect()
    }

    /// Forget the previous snapshot, in memory and in the backend.
    ///
    /// The next cycle then reports every record as added. Current datasets,
    /// the change log and `last_updated` are kept.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the persisted snapshot cannot be dropped;
    /// the in-memory snapshot is cleared regardless.
    pub fn clear_history(&mut self) -> Result<()> {
        self.previous = SnapshotDocument::default();
        self.backend
            .clear()
            .map_err(|e| e.with_op("clear_history"))
    }
}
