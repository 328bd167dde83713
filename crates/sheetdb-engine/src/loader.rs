//! Load cycles.
//!
//! A cycle claims the session's loading flag, fetches every catalog table
//! concurrently with the session lock released, then re-locks the session to
//! ingest all payloads at once. A second `load_all` while one runs returns
//! [`LoadOutcome::AlreadyInProgress`] without fetching anything.
//!
//! The in-flight claim is held by a [`CycleGuard`], so a cycle whose future is
//! dropped mid-fetch (timeout, `select!`) still releases it.

use crate::transport::SheetTransport;
use chrono::Utc;
use futures::future::join_all;
use sheetdb_core::errors::{ExError, Result};
use sheetdb_core::{log_op_end, log_op_start, CycleReport, IngestionSession};
use sheetdb_core_types::CycleContext;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::time::Instant;
use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Completed(CycleReport),
    AlreadyInProgress,
}

impl LoadOutcome {
    pub fn report(&self) -> Option<&CycleReport> {
        match self {
            LoadOutcome::Completed(report) => Some(report),
            LoadOutcome::AlreadyInProgress => None,
        }
    }
}

pub struct SiteLoader<T> {
    transport: T,
    session: Mutex<IngestionSession>,
    cache_bust: AtomicI64,
    in_flight: AtomicBool,
}

/// Claim on the loader's in-flight flag, released on drop.
///
/// If the cycle never reached `finish_load` the session flag is cleared here
/// too, when the session lock is free; otherwise the next cycle clears it.
struct CycleGuard<'a> {
    in_flight: &'a AtomicBool,
    session: &'a Mutex<IngestionSession>,
    finished: bool,
}

impl<'a> CycleGuard<'a> {
    fn acquire(in_flight: &'a AtomicBool, session: &'a Mutex<IngestionSession>) -> Option<Self> {
        in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(Self {
            in_flight,
            session,
            finished: false,
        })
    }
}

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Ok(mut session) = self.session.try_lock() {
                session.finish_load();
            }
            tracing::warn!("load cycle dropped before ingest, loading flag released");
        }
        self.in_flight.store(false, Ordering::SeqCst);
    }
}

impl<T: SheetTransport> SiteLoader<T> {
    pub fn new(transport: T, session: IngestionSession) -> Self {
        Self {
            transport,
            session: Mutex::new(session),
            cache_bust: AtomicI64::new(Utc::now().timestamp_millis()),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Exclusive access to the session, e.g. to read datasets between cycles.
    pub async fn session(&self) -> MutexGuard<'_, IngestionSession> {
        self.session.lock().await
    }

    /// True while a `load_all` future is alive and has not finished.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn cache_bust(&self) -> i64 {
        self.cache_bust.load(Ordering::SeqCst)
    }

    /// Run one load cycle over every catalog table.
    pub async fn load_all(&self) -> LoadOutcome {
        let ctx = CycleContext::new(self.cache_bust());
        let start = Instant::now();

        let Some(mut guard) = CycleGuard::acquire(&self.in_flight, &self.session) else {
            tracing::info!(cycle_id = %ctx.cycle_id, "load already in progress, skipping");
            return LoadOutcome::AlreadyInProgress;
        };

        let tabs: Vec<(String, String)> = {
            let mut session = self.session.lock().await;
            if !session.begin_load() {
                // only a dropped cycle leaves the flag set while in_flight is free
                tracing::warn!(cycle_id = %ctx.cycle_id, "clearing stale loading flag");
                session.finish_load();
                session.begin_load();
            }
            session
                .catalog()
                .iter()
                .map(|p| (p.name.clone(), p.tab.clone()))
                .collect()
        };

        log_op_start!("load_all", cycle_id = %ctx.cycle_id, table_count = tabs.len());

        let cache_bust = ctx.cache_bust;
        let fetches = tabs.iter().map(|(name, tab)| async move {
            (name, self.transport.fetch(tab, cache_bust).await)
        });
        let results = join_all(fetches).await;

        let mut payloads = HashMap::with_capacity(results.len());
        for (name, result) in results {
            match result {
                Ok(text) => {
                    payloads.insert(name.clone(), text);
                }
                Err(err) => {
                    let err: ExError = err.into();
                    tracing::warn!(
                        cycle_id = %ctx.cycle_id,
                        table = %name,
                        err.code = err.code(),
                        "fetch failed, table degrades to empty: {}",
                        err
                    );
                }
            }
        }

        let report = {
            let mut session = self.session.lock().await;
            let report = session.ingest_cycle(&payloads, Utc::now());
            session.finish_load();
            guard.finished = true;
            report
        };
        drop(guard);

        log_op_end!(
            "load_all",
            duration_ms = start.elapsed().as_millis() as u64,
            cycle_id = %ctx.cycle_id,
            fetched = payloads.len()
        );

        LoadOutcome::Completed(report)
    }

    /// Renew the cache-busting token, then load.
    pub async fn refresh(&self) -> LoadOutcome {
        let next = Utc::now()
            .timestamp_millis()
            .max(self.cache_bust() + 1);
        self.cache_bust.store(next, Ordering::SeqCst);
        self.load_all().await
    }

    /// Forget the persisted snapshot so the next cycle reports everything as added.
    ///
    /// # Errors
    ///
    /// Returns the backend error if the snapshot cannot be dropped.
    pub async fn clear_history(&self) -> Result<()> {
        self.session.lock().await.clear_history()
    }
}
