//! Command-line contact book.
//!
//! Lists, searches, and edits contacts stored in SQLite, going through the
//! same view engine the list screen uses.

mod commands;
mod config;
mod output;

use clap::Parser;
use contact_view::ViewEngine;
use database::Database;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "contact-book")]
#[command(about = "Manage contacts: list, search, tag, favorite, edit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    debug!(database_url = %config.database_url, "Loaded configuration");

    // Connect to database
    let db = Database::connect_with_pool_size(&config.database_url, config.pool_size).await?;
    db.migrate().await?;

    let engine = ViewEngine::new(db.clone());
    let result = commands::run(&engine, cli.command).await;
    db.close().await;

    let output = result?;
    print!("{output}");

    Ok(())
}
