//! Load command

use super::StoreOpts;
use crate::config::SiteConfig;
use clap::Args;
use sheetdb_core::diff::{render_change_details, render_change_log};
use sheetdb_core::{IngestionSession, Lang};
use sheetdb_engine::{DirTransport, HttpTransport, LoadOutcome, SheetTransport, SiteLoader};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Site configuration (TOML)
    #[arg(long)]
    pub config: PathBuf,

    #[command(flatten)]
    pub store: StoreOpts,

    /// Read `<dir>/<Tab>.csv` instead of fetching over HTTP
    #[arg(long)]
    pub from_dir: Option<PathBuf>,

    /// Language of change messages (en, tr); defaults to the site's
    #[arg(long)]
    pub lang: Option<String>,

    /// Print the cycle report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: LoadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = SiteConfig::load(&args.config)?;
    let lang = match &args.lang {
        Some(tag) => tag.parse::<Lang>()?,
        None => config.default_lang,
    };

    let catalog = config.catalog()?;
    let session = IngestionSession::open(catalog, args.store.open()?).with_lang(lang);

    let outcome = match &args.from_dir {
        Some(dir) => run(SiteLoader::new(DirTransport::new(dir), session)).await,
        None => {
            let transport = HttpTransport::new(config.source()?);
            run(SiteLoader::new(transport, session)).await
        }
    };

    let report = match outcome {
        LoadOutcome::Completed(report) => report,
        LoadOutcome::AlreadyInProgress => return Err("a load cycle is already in progress".into()),
    };

    if !report.persisted {
        eprintln!("Warning: snapshot could not be saved; history will not survive a restart");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print!("{}", render_change_log(&report.change_log, lang));
    for entry in report.change_log.changed_entries() {
        let details = render_change_details(&entry.changes);
        if !details.is_empty() {
            println!("{}:", entry.table);
            print!("{}", details);
        }
    }
    Ok(())
}

async fn run<T: SheetTransport>(loader: SiteLoader<T>) -> LoadOutcome {
    loader.load_all().await
}
