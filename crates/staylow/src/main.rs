//! staylow - Korean luxury-hotel price tracker
//!
//! # Usage
//!
//! ```bash
//! # Scrape, classify, and deliver today's report (default)
//! staylow
//! staylow run --config configs/staylow.toml
//! staylow run --dry-run
//!
//! # Inspect tracked state without scraping
//! staylow prices --sort price-asc
//! staylow history "grand hyatt" --days 30
//! ```

mod cmd;
mod pipeline;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use staylow_config::Config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// staylow - Korean luxury-hotel price tracker
#[derive(Parser, Debug)]
#[command(name = "staylow")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file to use; missing file is an error when given explicitly
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); wins over the config file
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape both sources, update price history, and deliver the report
    Run(cmd::run::RunArgs),

    /// Show the latest tracked price for every hotel
    Prices(cmd::prices::PricesArgs),

    /// Show the price history of one hotel
    History(cmd::history::HistoryArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    match cli.command.take() {
        Some(Command::Run(args)) => {
            init_logging(&resolve_log_level(&cli))?;
            cmd::run::run(args, cli.config).await
        }
        // The dashboard commands write tables to stdout; tracing output
        // would interleave with them, so neither initializes logging.
        Some(Command::Prices(args)) => cmd::prices::run(args, cli.config),
        Some(Command::History(args)) => cmd::history::run(args, cli.config),
        // Bare `staylow` runs the daily update
        None => {
            init_logging(&resolve_log_level(&cli))?;
            cmd::run::run(cmd::run::RunArgs { dry_run: false }, cli.config).await
        }
    }
}

/// Pick the log level: CLI flag, then config file, then "info"
fn resolve_log_level(cli: &Cli) -> String {
    if let Some(level) = &cli.log_level {
        return level.clone();
    }

    cli.config
        .as_deref()
        .filter(|path| path.exists())
        .and_then(|path| Config::from_file(path).ok())
        .map(|config| config.log.level.as_str().to_string())
        .unwrap_or_else(|| "info".to_string())
}

/// Install the tracing subscriber for the run pipeline
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();

    Ok(())
}
