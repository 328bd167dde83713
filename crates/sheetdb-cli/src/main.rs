//! sheetdb CLI
//!
//! Command-line interface for loading spreadsheet-backed sites and
//! inspecting their change history

use clap::{Parser, Subcommand};
use sheetdb_core::logging_facility::{init, Profile};

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "sheetdb")]
#[command(about = "sheetdb - spreadsheet ingestion and change detection", long_about = None)]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one load cycle and print the change log
    Load(commands::load::LoadArgs),
    /// Parse a CSV file and print the projected dataset as JSON
    Parse(commands::parse::ParseArgs),
    /// Show the persisted snapshot's table counts and age
    Status(commands::status::StatusArgs),
    /// Drop the persisted snapshot
    ClearHistory(commands::clear_history::ClearHistoryArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init(if cli.log_json {
        Profile::Production
    } else {
        Profile::Development
    });

    let result = match cli.command {
        Commands::Load(args) => commands::load::execute(args).await,
        Commands::Parse(args) => commands::parse::execute(args),
        Commands::Status(args) => commands::status::execute(args),
        Commands::ClearHistory(args) => commands::clear_history::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
