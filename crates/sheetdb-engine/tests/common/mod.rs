use async_trait::async_trait;
use sheetdb_core::{IngestionSession, MemorySnapshotBackend, TableCatalog, TableProfile};
use sheetdb_engine::{SheetTransport, TransportError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Serves tab payloads from memory; tabs without a payload answer HTTP 500.
#[derive(Default)]
pub struct MemoryTransport {
    tabs: Mutex<HashMap<String, String>>,
    pub calls: AtomicUsize,
    pub last_cache_bust: Mutex<Option<i64>>,
}

#[allow(dead_code)]
impl MemoryTransport {
    pub fn with_tabs(tabs: &[(&str, &str)]) -> Self {
        let t = Self::default();
        for (tab, text) in tabs {
            t.set(tab, text);
        }
        t
    }

    pub fn set(&self, tab: &str, text: &str) {
        self.tabs
            .lock()
            .unwrap()
            .insert(tab.to_string(), text.to_string());
    }

    pub fn remove(&self, tab: &str) {
        self.tabs.lock().unwrap().remove(tab);
    }
}

#[async_trait]
impl SheetTransport for MemoryTransport {
    async fn fetch(&self, tab: &str, cache_bust: i64) -> Result<String, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_cache_bust.lock().unwrap() = Some(cache_bust);
        self.tabs
            .lock()
            .unwrap()
            .get(tab)
            .cloned()
            .ok_or(TransportError::Http {
                tab: tab.to_string(),
                status: 500,
            })
    }
}

/// Blocks every fetch until released, signalling when the first fetch starts.
/// Once `open` is set, fetches pass straight through.
#[allow(dead_code)]
pub struct GatedTransport {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
    pub open: AtomicBool,
    pub inner: MemoryTransport,
}

#[allow(dead_code)]
impl GatedTransport {
    pub fn new(inner: MemoryTransport) -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
            open: AtomicBool::new(false),
            inner,
        }
    }
}

#[async_trait]
impl SheetTransport for GatedTransport {
    async fn fetch(&self, tab: &str, cache_bust: i64) -> Result<String, TransportError> {
        if !self.open.load(Ordering::SeqCst) {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.inner.fetch(tab, cache_bust).await
    }
}

#[allow(dead_code)]
pub fn two_table_session() -> IngestionSession {
    let catalog = TableCatalog::new(vec![
        TableProfile::settings("settings", "Settings"),
        TableProfile::records("news", "News"),
    ])
    .unwrap();
    IngestionSession::open(catalog, Box::new(MemorySnapshotBackend::new()))
}
