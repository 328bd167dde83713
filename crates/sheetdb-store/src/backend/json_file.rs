//! Single-file JSON snapshot backend.

use crate::errors::{io_error, Result};
use crate::fs::atomic_write;
use sheetdb_core::snapshot::{SnapshotBackend, SnapshotDocument};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the whole document as one JSON file, replaced atomically on save.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotBackend {
    path: PathBuf,
}

impl JsonFileSnapshotBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotBackend for JsonFileSnapshotBackend {
    fn load(&self) -> Result<Option<SnapshotDocument>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("load_snapshot", e)),
        };
        SnapshotDocument::from_json(&text)
            .map(Some)
            .map_err(|e| e.with_op("load_snapshot"))
    }

    fn save(&mut self, doc: &SnapshotDocument) -> Result<()> {
        let json = doc.to_json()?;
        atomic_write(&self.path, json.as_bytes())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("clear_snapshot", e)),
        }
    }
}
