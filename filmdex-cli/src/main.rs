//! Filmdex CLI - Command-line interface
//!
//! Provides command-line access to movie search and metadata lookup.

mod commands;

use clap::Parser;
use filmdex_core::config::FilmdexConfig;
use filmdex_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "filmdex")]
#[command(about = "Search movies and series with IMDb rating filters")]
struct Cli {
    /// Console log verbosity
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)?;

    let config = FilmdexConfig::from_env();
    commands::handle_command(&config, cli.command).await?;

    Ok(())
}
