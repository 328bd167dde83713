//! Clear-history command

use super::StoreOpts;
use clap::Args;

#[derive(Debug, Args)]
pub struct ClearHistoryArgs {
    #[command(flatten)]
    pub store: StoreOpts,
}

pub fn execute(args: ClearHistoryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut backend = args.store.open()?;
    backend.clear()?;
    println!("Snapshot history cleared");
    Ok(())
}
