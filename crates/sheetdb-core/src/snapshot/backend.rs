//! Snapshot persistence seam.

use crate::errors::Result;
use crate::snapshot::document::SnapshotDocument;

/// Durable storage for the snapshot document.
///
/// Implementations live in `sheetdb-store`; [`MemorySnapshotBackend`] covers
/// tests and ephemeral sessions.
pub trait SnapshotBackend: Send {
    /// Load the persisted document. `Ok(None)` means nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns an error if storage is unreadable or the document is corrupt.
    fn load(&self) -> Result<Option<SnapshotDocument>>;

    /// Replace the persisted document in full.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&mut self, doc: &SnapshotDocument) -> Result<()>;

    /// Drop the persisted document.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be modified.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory backend. Optionally fails every save, for exercising the
/// "persistence failure is logged, not fatal" path.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotBackend {
    doc: Option<SnapshotDocument>,
    fail_saves: bool,
    saves: usize,
}

impl MemorySnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(doc: SnapshotDocument) -> Self {
        Self {
            doc: Some(doc),
            ..Self::default()
        }
    }

    pub fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn document(&self) -> Option<&SnapshotDocument> {
        self.doc.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SnapshotBackend for MemorySnapshotBackend {
    fn load(&self) -> Result<Option<SnapshotDocument>> {
        Ok(self.doc.clone())
    }

    fn save(&mut self, doc: &SnapshotDocument) -> Result<()> {
        if self.fail_saves {
            return Err(crate::errors::SheetDbError::Persistence {
                message: "memory backend configured to fail saves".to_string(),
            }
            .into());
        }
        self.doc = Some(doc.clone());
        self.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.doc = None;
        Ok(())
    }
}
