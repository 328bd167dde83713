//! Parse command

use clap::Args;
use sheetdb_core::parse::parse_table;
use sheetdb_core::TableKind;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// CSV file to parse
    pub file: PathBuf,

    /// Treat the file as a headerless key/value settings table
    #[arg(long)]
    pub settings: bool,
}

pub fn execute(args: ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.file)?;
    let kind = if args.settings {
        TableKind::Settings
    } else {
        TableKind::Records
    };
    let dataset = parse_table(&text, kind);
    println!("{}", serde_json::to_string_pretty(&dataset)?);
    Ok(())
}
