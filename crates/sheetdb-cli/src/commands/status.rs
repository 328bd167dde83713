//! Status command

use super::StoreOpts;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub store: StoreOpts,
}

pub fn execute(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let backend = args.store.open()?;
    let Some(doc) = backend.load()? else {
        println!("No snapshot stored at {}", args.store.db.display());
        return Ok(());
    };

    match doc.saved_at {
        Some(ts) => println!("Last updated: {}", ts.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("Last updated: unknown"),
    }
    for (key, dataset) in &doc.tables {
        println!("  {:<16} {:>6}", key, dataset.len());
    }
    Ok(())
}
