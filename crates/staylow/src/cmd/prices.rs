//! Prices command - current state of every tracked hotel
//!
//! Reads the snapshot, never the full log, so output is instant even with
//! a long scrape history.
//!
//! # Usage
//!
//! ```bash
//! staylow prices
//! staylow prices --sort price-asc
//! staylow prices --city busan
//! staylow prices --format json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;

use staylow_store::{SnapshotEntry, SnapshotStore};

/// Prices command arguments
#[derive(Args, Debug)]
pub struct PricesArgs {
    /// Sort order (name, price-asc, price-desc)
    #[arg(short, long, default_value = "name")]
    pub sort: String,

    /// Keep only hotels whose name contains this text (case-insensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

#[derive(Serialize)]
struct PriceRow<'a> {
    code: &'a str,
    #[serde(flatten)]
    entry: &'a SnapshotEntry,
}

/// Run the prices command
pub fn run(args: PricesArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = crate::cmd::run::load_config(config_path.as_deref())?;

    let snapshot = SnapshotStore::new(config.storage.snapshot_path());
    let mut rows: Vec<(String, SnapshotEntry)> = snapshot.load().into_iter().collect();

    if let Some(city) = &args.city {
        let needle = city.to_lowercase();
        rows.retain(|(_, entry)| entry.name.to_lowercase().contains(&needle));
    }

    match args.sort.as_str() {
        // Snapshot iteration is already code-ordered
        "name" => {}
        "price-asc" => rows.sort_by_key(|(_, entry)| entry.price),
        "price-desc" => {
            rows.sort_by_key(|(_, entry)| entry.price);
            rows.reverse();
        }
        other => anyhow::bail!(
            "unknown sort order: {}. Use one of: name, price-asc, price-desc",
            other
        ),
    }

    match args.format.as_str() {
        "json" => {
            let payload: Vec<PriceRow> = rows
                .iter()
                .map(|(code, entry)| PriceRow { code, entry })
                .collect();
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        "table" => print_table(&rows),
        other => anyhow::bail!("unknown output format: {}. Use one of: table, json", other),
    }

    Ok(())
}

fn print_table(rows: &[(String, SnapshotEntry)]) {
    if rows.is_empty() {
        println!("(no data)");
        return;
    }

    println!(
        "{}",
        format!(
            "{:<34} {:>8} {:>8} {:>10} {:>8} {:>10}",
            "Hotel", "Price", "Low", "Earliest", "Credit", "Updated"
        )
        .bold()
    );
    println!("{}", "-".repeat(85));

    for (_, entry) in rows {
        let at_low = entry.price == entry.all_time_low;

        let price = format!("{:>8}", format!("${}", entry.price));
        let price = if at_low {
            price.green().to_string()
        } else {
            price
        };

        let earliest = entry
            .earliest
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        // Inferred credits carry a tilde so defaults are visible at a glance
        let credit = if entry.credit_inferred {
            format!("~${}", entry.credit)
        } else {
            format!("${}", entry.credit)
        };

        let marker = if at_low { " 🔥" } else { "" };

        println!(
            "{:<34} {} {:>8} {:>10} {:>8} {}{}",
            entry.name,
            price,
            format!("${}", entry.all_time_low),
            earliest,
            credit,
            format!("{:>10}", entry.updated.to_string()).dimmed(),
            marker
        );
    }

    println!("{}", "-".repeat(85));

    let at_low = rows
        .iter()
        .filter(|(_, entry)| entry.price == entry.all_time_low)
        .count();
    let min = rows.iter().map(|(_, entry)| entry.price).min().unwrap_or(0);
    let max = rows.iter().map(|(_, entry)| entry.price).max().unwrap_or(0);
    println!(
        "{} hotels  Min: ${}  Max: ${}  At all-time low: {}",
        rows.len(),
        min,
        max,
        at_low
    );
}
