//! Run command - fetch prices, classify against history, deliver the report
//!
//! This is the default command: invoking `staylow` with no subcommand is
//! equivalent to `staylow run`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use tracing::{info, warn};

use staylow_config::Config;
use staylow_notify::{NotifyError, Telegram};
use staylow_scrape::resilience::RetryPolicy;
use staylow_scrape::{Amex, AmexConfig, MaxFhr, MaxFhrConfig};
use staylow_store::{PriceLog, SnapshotStore};

use crate::pipeline::{self, RunOptions, RunOutcome};

/// Default config locations probed when no --config flag is given
const DEFAULT_CONFIG_PATHS: &[&str] = &["configs/staylow.toml", "staylow.toml"];

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Print the report to stdout instead of sending it to Telegram
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the update pipeline once
pub async fn run(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        storage = %config.storage.dir.display(),
        dry_run = args.dry_run,
        "staylow starting"
    );

    let log = PriceLog::new(config.storage.log_path());
    let snapshot = SnapshotStore::new(config.storage.snapshot_path());

    let primary =
        MaxFhr::new(maxfhr_config(&config)).context("failed to initialize the MaxFHR source")?;

    let secondary = if config.sources.amex.enabled {
        Some(Amex::new(amex_config(&config)).context("failed to initialize the Amex source")?)
    } else {
        info!("Amex source disabled, running without promos");
        None
    };

    let messenger = if args.dry_run {
        None
    } else {
        Some(telegram_messenger(&config)?)
    };

    let now = Local::now();
    let options = RunOptions {
        title: config.report.title.clone(),
        chunk_size: config.report.chunk_size,
        default_credit: config.report.default_credit,
        threshold: config.matching.threshold,
        today: now.date_naive(),
        now: now.naive_local(),
    };

    let outcome = pipeline::run_once(
        &primary,
        secondary.as_ref(),
        messenger.as_ref(),
        &log,
        &snapshot,
        &options,
    )
    .await;

    match outcome {
        RunOutcome::Completed(summary) => {
            info!(
                observed = summary.observed,
                record_lows = summary.record_lows,
                chunks = summary.chunks_delivered,
                "staylow run finished"
            );
        }
        RunOutcome::Aborted => {
            warn!("staylow run aborted, nothing persisted");
        }
    }

    Ok(())
}

/// Resolve and load configuration the same way for every command
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            // User explicitly provided config path - must exist
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            Config::from_file(path).context("failed to load configuration")
        }
        None => {
            for candidate in DEFAULT_CONFIG_PATHS {
                let candidate = Path::new(candidate);
                if candidate.exists() {
                    info!(config = %candidate.display(), "using config file");
                    return Config::from_file(candidate).context("failed to load configuration");
                }
            }
            info!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn maxfhr_config(config: &Config) -> MaxFhrConfig {
    let source = &config.sources.maxfhr;
    MaxFhrConfig {
        base_url: source.base_url.clone(),
        cities: source.cities.clone(),
        policy: retry_policy(
            source.timeout_secs,
            source.max_retries,
            source.retry_base_delay_ms,
        ),
    }
}

fn amex_config(config: &Config) -> AmexConfig {
    let source = &config.sources.amex;
    AmexConfig {
        base_url: source.base_url.clone(),
        destination: source.destination.clone(),
        policy: retry_policy(
            source.timeout_secs,
            source.max_retries,
            source.retry_base_delay_ms,
        ),
    }
}

fn retry_policy(timeout_secs: u64, attempts: u32, retry_base_delay_ms: u64) -> RetryPolicy {
    RetryPolicy {
        timeout_secs,
        // Config counts total attempts; the policy counts retries after the first
        max_retries: attempts.saturating_sub(1),
        retry_base_delay_ms,
    }
}

fn telegram_messenger(config: &Config) -> Result<Telegram> {
    let token = config
        .telegram
        .resolve_token()
        .ok_or(NotifyError::MissingToken)?;
    let chat_id = config
        .telegram
        .resolve_chat_id()
        .ok_or(NotifyError::MissingChatId)?;
    Telegram::new(&token, chat_id).context("failed to initialize Telegram delivery")
}
