//! Medialist CLI - Command-line interface
//!
//! Runs the web server or searches the catalog from the terminal.

mod commands;

use clap::Parser;
use medialist_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "medialist")]
#[command(about = "Search movies and series and keep a watchlist")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    commands::handle_command(cli.command).await
}
