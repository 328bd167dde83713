//! SQLite snapshot backend.
//!
//! One row per table in `table_snapshots`, the document timestamp in
//! `snapshot_meta`. A save replaces every row inside one transaction.

use crate::db;
use crate::errors::{from_rusqlite, serialization_error, Result};
use crate::migrations::apply_migrations;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sheetdb_core::snapshot::{SnapshotBackend, SnapshotDocument};
use sheetdb_core::Dataset;
use std::path::Path;

const META_SAVED_AT: &str = "saved_at";

pub struct SqliteSnapshotBackend {
    conn: Connection,
}

impl SqliteSnapshotBackend {
    /// Open (creating if needed) and migrate the database at `path`.
    ///
    /// # Errors
    ///
    /// `Persistence` if the file cannot be opened or a migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    /// Migrated in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshot_meta WHERE key = ?",
                [META_SAVED_AT],
                |row| row.get(0),
            )
            .optional()
            .map_err(from_rusqlite)?;

        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| serialization_error("load_snapshot", e))
        })
        .transpose()
    }
}

impl SnapshotBackend for SqliteSnapshotBackend {
    fn load(&self) -> Result<Option<SnapshotDocument>> {
        let saved_at = self.saved_at()?;

        let mut stmt = self
            .conn
            .prepare("SELECT table_key, payload FROM table_snapshots ORDER BY table_key")
            .map_err(from_rusqlite)?;
        let rows: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        if saved_at.is_none() && rows.is_empty() {
            return Ok(None);
        }

        let mut doc = SnapshotDocument {
            saved_at,
            ..SnapshotDocument::default()
        };
        for (key, payload) in rows {
            let dataset: Dataset = serde_json::from_str(&payload).map_err(|e| {
                serialization_error("load_snapshot", e).with_table(key.clone())
            })?;
            doc.insert(key, dataset);
        }

        Ok(Some(doc))
    }

    fn save(&mut self, doc: &SnapshotDocument) -> Result<()> {
        let saved_at = doc.saved_at.unwrap_or_else(Utc::now).to_rfc3339();

        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        tx.execute("DELETE FROM table_snapshots", [])
            .map_err(from_rusqlite)?;
        for (key, dataset) in &doc.tables {
            let payload = serde_json::to_string(dataset)
                .map_err(|e| serialization_error("save_snapshot", e).with_table(key.clone()))?;
            tx.execute(
                "INSERT INTO table_snapshots (table_key, payload, saved_at) VALUES (?1, ?2, ?3)",
                params![key, payload, saved_at],
            )
            .map_err(from_rusqlite)?;
        }
        tx.execute(
            "INSERT INTO snapshot_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![META_SAVED_AT, saved_at],
        )
        .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(table_count = doc.tables.len(), "snapshot saved to sqlite");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction().map_err(from_rusqlite)?;
        tx.execute("DELETE FROM table_snapshots", [])
            .map_err(from_rusqlite)?;
        tx.execute("DELETE FROM snapshot_meta", [])
            .map_err(from_rusqlite)?;
        tx.commit().map_err(from_rusqlite)
    }
}
