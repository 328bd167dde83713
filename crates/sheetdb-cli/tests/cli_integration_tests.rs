//! CLI integration tests
//!
//! Run the `sheetdb` binary against CSV fixtures in a temp directory.

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const SITE_TOML: &str = r#"
mode = "single"
sheet_id = "unused-offline"

[tabs]
settings = "Settings"
news = "News"
"#;

struct Site {
    dir: TempDir,
}

impl Site {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("tabs")).unwrap();
        fs::write(dir.path().join("site.toml"), SITE_TOML).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write_tab(&self, tab: &str, text: &str) {
        fs::write(self.path("tabs").join(format!("{}.csv", tab)), text).unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_sheetdb"))
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .expect("Failed to execute CLI")
    }

    fn load(&self, store: &str, extra: &[&str]) -> Output {
        let db = self.path("history/snapshot.db");
        let mut args = vec![
            "load",
            "--config",
            "site.toml",
            "--from-dir",
            "tabs",
            "--store",
            store,
            "--db",
            db.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        self.run(&args)
    }
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "CLI failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_parse_prints_records_as_json() {
    let site = Site::new();
    let file = write_file(
        site.dir.path(),
        "news.csv",
        "ID,Title EN\n1,\"Launch, day one\"\n2,Award\n",
    );

    let out = stdout(&site.run(&["parse", file.to_str().unwrap()]));
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"id": "1", "title_en": "Launch, day one"},
            {"id": "2", "title_en": "Award"}
        ])
    );
}

#[test]
fn test_parse_settings_flag_builds_key_value_map() {
    let site = Site::new();
    let file = write_file(
        site.dir.path(),
        "settings.csv",
        "key,value\nsite_name,Lab\n\"phone\nemail\",\"123\nlab@example.org\"\n",
    );

    let out = stdout(&site.run(&["parse", file.to_str().unwrap(), "--settings"]));
    let parsed: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        parsed,
        json!({"site_name": "Lab", "phone": "123", "email": "lab@example.org"})
    );
}

#[test]
fn test_load_from_dir_reports_changes_across_runs() {
    let site = Site::new();
    site.write_tab("Settings", "site_name,Lab\n");
    site.write_tab("News", "id,title\n1,Launch\n");

    let first = stdout(&site.load("sqlite", &[]));
    assert!(first.contains("settings: +1 new"), "{}", first);
    assert!(first.contains("news: +1 new"), "{}", first);

    site.write_tab("News", "id,title\n1,Launch\n2,Award\n");
    let second = stdout(&site.load("sqlite", &[]));
    assert!(second.contains("news: +1 new"), "{}", second);
    assert!(second.contains("  + Award"), "{}", second);
    assert!(!second.contains("settings:"), "{}", second);

    let third = stdout(&site.load("sqlite", &[]));
    assert_eq!(third, "All data up to date\n");
}

#[test]
fn test_load_json_report_and_status() {
    let site = Site::new();
    site.write_tab("Settings", "site_name,Lab\n");
    site.write_tab("News", "id,title\n1,Launch\n2,Award\n");

    let out = stdout(&site.load("json", &["--json"]));
    let report: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(report["persisted"], json!(true));
    let news = report["change_log"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["table"] == "news")
        .expect("news entry");
    assert_eq!(news["classification"], "added");
    assert_eq!(news["message"], "+2 new");

    let db = site.path("history/snapshot.db");
    let status = stdout(&site.run(&["status", "--store", "json", "--db", db.to_str().unwrap()]));
    assert!(status.starts_with("Last updated: "), "{}", status);
    let news_line = status
        .lines()
        .find(|l| l.trim_start().starts_with("News"))
        .expect("News line");
    assert!(news_line.trim_end().ends_with('2'), "{}", news_line);
}

#[test]
fn test_clear_history_makes_next_load_report_everything_added() {
    let site = Site::new();
    site.write_tab("Settings", "site_name,Lab\n");
    site.write_tab("News", "id,title\n1,Launch\n");
    stdout(&site.load("sqlite", &[]));

    let db = site.path("history/snapshot.db");
    let cleared = stdout(&site.run(&["clear-history", "--db", db.to_str().unwrap()]));
    assert_eq!(cleared, "Snapshot history cleared\n");

    let status = stdout(&site.run(&["status", "--db", db.to_str().unwrap()]));
    assert!(status.starts_with("No snapshot stored"), "{}", status);

    let again = stdout(&site.load("sqlite", &["--lang", "tr"]));
    assert!(again.contains("news: +1 yeni"), "{}", again);
}

#[test]
fn test_unsupported_lang_fails() {
    let site = Site::new();
    site.write_tab("News", "id,title\n1,Launch\n");

    let output = site.load("sqlite", &["--lang", "de"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "{}", stderr);
}
