use super::SheetTransport;
use crate::errors::TransportError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads `<dir>/<tab>.csv`. Offline mode and fixtures.
#[derive(Debug, Clone)]
pub struct DirTransport {
    dir: PathBuf,
}

impl DirTransport {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, tab: &str) -> PathBuf {
        self.dir.join(format!("{tab}.csv"))
    }
}

#[async_trait]
impl SheetTransport for DirTransport {
    async fn fetch(&self, tab: &str, _cache_bust: i64) -> Result<String, TransportError> {
        tokio::fs::read_to_string(self.path_for(tab))
            .await
            .map_err(|source| TransportError::Io {
                tab: tab.to_string(),
                source,
            })
    }
}
