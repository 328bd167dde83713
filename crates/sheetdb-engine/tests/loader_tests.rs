#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{two_table_session, GatedTransport, MemoryTransport};
use sheetdb_core::logging_facility::test_capture::init_test_capture;
use sheetdb_core::sheetdb_core_types::schema::{EVENT_END, EVENT_START, FIELD_CYCLE_ID};
use sheetdb_core::Classification;
use sheetdb_engine::{DirTransport, LoadOutcome, SiteLoader};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const SETTINGS: &str = "site_name,Lab\n";
const NEWS_V1: &str = "id,title\n1,Launch\n";
const NEWS_V2: &str = "id,title\n1,Launch\n2,Award\n";

#[tokio::test]
async fn test_load_all_fetches_every_table() {
    let transport = MemoryTransport::with_tabs(&[("Settings", SETTINGS), ("News", NEWS_V1)]);
    let loader = SiteLoader::new(transport, two_table_session());

    let outcome = loader.load_all().await;
    let report = outcome.report().expect("completed");

    assert_eq!(report.change_log.len(), 2);
    assert!(report.has_changes());
    assert_eq!(loader.session().await.settings().unwrap()["site_name"], "Lab");
    assert!(!loader.session().await.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_degrades_table() {
    let transport = MemoryTransport::with_tabs(&[("Settings", SETTINGS)]);
    let loader = SiteLoader::new(transport, two_table_session());

    let outcome = loader.load_all().await;
    let report = outcome.report().unwrap();

    assert!(report.change_log.get("news").is_none());
    assert!(report.change_log.get("settings").is_some());
    let news = report.tables.iter().find(|t| t.table == "news").unwrap();
    assert_eq!(news.count, 0);
}

#[tokio::test]
async fn test_second_cycle_reports_additions() {
    let loader = SiteLoader::new(
        MemoryTransport::with_tabs(&[("Settings", SETTINGS), ("News", NEWS_V1)]),
        two_table_session(),
    );
    loader.load_all().await;

    loader.transport().set("News", NEWS_V2);
    let outcome = loader.refresh().await;
    let report = outcome.report().unwrap();

    let news = report.change_log.get("news").unwrap();
    assert_eq!(news.classification, Classification::Added);
    assert_eq!(news.message, "+1 new");
    let settings = report.change_log.get("settings").unwrap();
    assert_eq!(settings.classification, Classification::Unchanged);
}

#[tokio::test]
async fn test_refresh_renews_cache_bust() {
    let loader = SiteLoader::new(
        MemoryTransport::with_tabs(&[("News", NEWS_V1)]),
        two_table_session(),
    );
    let before = loader.cache_bust();
    loader.refresh().await;
    let after = loader.cache_bust();
    assert!(after > before);
    assert_eq!(*loader.transport().last_cache_bust.lock().unwrap(), Some(after));
}

#[tokio::test]
async fn test_concurrent_load_is_rejected() {
    let transport = GatedTransport::new(MemoryTransport::with_tabs(&[
        ("Settings", SETTINGS),
        ("News", NEWS_V1),
    ]));
    let started = transport.started.clone();
    let release = transport.release.clone();
    let loader = Arc::new(SiteLoader::new(transport, two_table_session()));

    let first = {
        let loader = loader.clone();
        tokio::spawn(async move { loader.load_all().await })
    };
    started.notified().await;

    assert_eq!(loader.load_all().await, LoadOutcome::AlreadyInProgress);

    release.notify_waiters();
    // a fetch may register after notify_waiters; keep releasing until done
    let outcome = loop {
        if first.is_finished() {
            break first.await.unwrap();
        }
        release.notify_waiters();
        tokio::task::yield_now().await;
    };
    assert!(matches!(outcome, LoadOutcome::Completed(_)));
    assert!(!loader.session().await.is_loading());
}

#[tokio::test]
async fn test_cancelled_load_releases_loading_flag() {
    let transport = GatedTransport::new(MemoryTransport::with_tabs(&[
        ("Settings", SETTINGS),
        ("News", NEWS_V1),
    ]));
    let loader = SiteLoader::new(transport, two_table_session());

    let timed_out = tokio::time::timeout(Duration::from_millis(50), loader.load_all()).await;
    assert!(timed_out.is_err());
    assert!(!loader.is_loading());
    assert!(!loader.session().await.is_loading());

    loader.transport().open.store(true, Ordering::SeqCst);
    let outcome = loader.load_all().await;
    let report = outcome.report().expect("cycle after cancellation completes");
    assert_eq!(report.change_log.len(), 2);
    assert!(!loader.is_loading());
}

#[tokio::test]
async fn test_stale_session_flag_does_not_block_loader() {
    let mut session = two_table_session();
    assert!(session.begin_load());
    let loader = SiteLoader::new(
        MemoryTransport::with_tabs(&[("Settings", SETTINGS), ("News", NEWS_V1)]),
        session,
    );

    let outcome = loader.load_all().await;
    assert!(matches!(outcome, LoadOutcome::Completed(_)));
    assert!(!loader.session().await.is_loading());
}

#[tokio::test]
async fn test_cycle_start_and_end_share_cycle_id() {
    let capture = init_test_capture();
    let loader = SiteLoader::new(
        MemoryTransport::with_tabs(&[("Settings", SETTINGS), ("News", NEWS_V1)]),
        two_table_session(),
    );
    loader.load_all().await;

    let end = capture.find("load_all", EVENT_END).expect("end event");
    let cycle_id = end.field(FIELD_CYCLE_ID).expect("cycle id").to_string();
    let events = capture.matching("load_all", FIELD_CYCLE_ID, &cycle_id);
    assert!(events.iter().any(|e| e.event() == Some(EVENT_START)));
}

#[tokio::test]
async fn test_dir_transport_cycle() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("News.csv"), NEWS_V1).unwrap();
    std::fs::write(dir.path().join("Settings.csv"), SETTINGS).unwrap();

    let loader = SiteLoader::new(DirTransport::new(dir.path()), two_table_session());
    let outcome = loader.load_all().await;
    assert_eq!(outcome.report().unwrap().change_log.len(), 2);
}

#[tokio::test]
async fn test_clear_history_forwards_to_session() {
    let transport = MemoryTransport::with_tabs(&[("News", NEWS_V1)]);
    let loader = SiteLoader::new(transport, two_table_session());
    loader.load_all().await;

    loader.clear_history().await.unwrap();
    let outcome = loader.load_all().await;
    let news = outcome.report().unwrap().change_log.get("news").unwrap();
    assert_eq!(news.classification, Classification::Added);
}

#[tokio::test]
async fn test_every_table_fetched_once_per_cycle() {
    let transport = MemoryTransport::with_tabs(&[("News", NEWS_V1)]);
    let loader = SiteLoader::new(transport, two_table_session());
    loader.load_all().await;
    loader.load_all().await;
    assert_eq!(loader.transport().calls.load(Ordering::SeqCst), 4);
}
