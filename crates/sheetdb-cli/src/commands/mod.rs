pub mod clear_history;
pub mod load;
pub mod parse;
pub mod status;

use clap::{Args, ValueEnum};
use sheetdb_store::StoreKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    Sqlite,
    Json,
}

impl From<StoreArg> for StoreKind {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Sqlite => StoreKind::Sqlite,
            StoreArg::Json => StoreKind::Json,
        }
    }
}

/// Snapshot location shared by every command that touches history.
#[derive(Debug, Clone, Args)]
pub struct StoreOpts {
    #[arg(long, value_enum, default_value_t = StoreArg::Sqlite)]
    pub store: StoreArg,

    #[arg(long, default_value = ".sheetdb/snapshot.db")]
    pub db: PathBuf,
}

impl StoreOpts {
    pub fn open(&self) -> sheetdb_store::Result<Box<dyn sheetdb_core::SnapshotBackend>> {
        if let Some(parent) = self.db.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    sheetdb_store::errors::io_error("create_store_dir", e)
                })?;
            }
        }
        sheetdb_store::open_backend(self.store.into(), &self.db)
    }
}
