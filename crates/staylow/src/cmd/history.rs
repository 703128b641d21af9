//! History command - one hotel's price series over time
//!
//! The hotel argument accepts anything that identifies the hotel: the
//! exact code, the display name, or a fragment of either.
//!
//! # Usage
//!
//! ```bash
//! staylow history "grand hyatt"
//! staylow history "grand hyatt" --days 30
//! staylow history signiel --format json
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;

use staylow_store::{LogEntry, PriceLog, PricePoint, hotel_code};

/// Width of the widest price bar
const BAR_WIDTH: usize = 30;

/// History command arguments
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Hotel to look up (code, name, or a fragment of either)
    pub hotel: String,

    /// Limit output to the most recent N observations
    #[arg(short, long)]
    pub days: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Run the history command
pub fn run(args: HistoryArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = crate::cmd::run::load_config(config_path.as_deref())?;

    let log = PriceLog::new(config.storage.log_path());
    let entries = log.read_all();
    if entries.is_empty() {
        anyhow::bail!("no price history recorded yet, run `staylow run` first");
    }

    let (code, name) = resolve_hotel(&entries, &args.hotel)?;
    let points = log.history_for(&code, args.days);

    match args.format.as_str() {
        "json" => {
            let payload = serde_json::json!({
                "code": code,
                "name": name,
                "points": points,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        "table" => print_table(&name, &code, &points),
        other => anyhow::bail!("unknown output format: {}. Use one of: table, json", other),
    }

    Ok(())
}

/// Map a user-supplied hotel query to a single known code
///
/// Exact code match wins; otherwise the query must narrow down to one
/// hotel by substring.
fn resolve_hotel(entries: &[LogEntry], query: &str) -> Result<(String, String)> {
    // Latest observed display name per code
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    for entry in entries {
        for hotel in &entry.hotels {
            names.insert(hotel.code.as_str(), hotel.name.as_str());
        }
    }

    let needle = hotel_code(query);
    if needle.is_empty() {
        anyhow::bail!("no usable hotel name in {:?}", query);
    }

    if let Some(name) = names.get(needle.as_str()) {
        return Ok((needle, (*name).to_string()));
    }

    let matches: Vec<(&str, &str)> = names
        .iter()
        .filter(|(code, _)| code.contains(needle.as_str()))
        .map(|(code, name)| (*code, *name))
        .collect();

    match matches.as_slice() {
        [] => anyhow::bail!(
            "no hotel matches {:?}; run `staylow prices` to list known hotels",
            query
        ),
        [(code, name)] => Ok(((*code).to_string(), (*name).to_string())),
        _ => {
            let candidates: Vec<&str> = matches.iter().map(|(_, name)| *name).collect();
            anyhow::bail!(
                "{:?} is ambiguous, matches: {}",
                query,
                candidates.join(", ")
            )
        }
    }
}

fn print_table(name: &str, code: &str, points: &[PricePoint]) {
    println!("{} {}", name.bold(), format!("({})", code).dimmed());
    println!();

    if points.is_empty() {
        println!("(no data)");
        return;
    }

    let min = points.iter().map(|p| p.price).min().unwrap_or(0);
    let max = points.iter().map(|p| p.price).max().unwrap_or(0);
    let span = max.saturating_sub(min).max(1) as usize;

    println!("{}", format!("{:<12} {:>8}", "Date", "Price").bold());
    println!("{}", "-".repeat(53));

    for point in points {
        let width = 1 + (point.price - min) as usize * (BAR_WIDTH - 1) / span;
        println!(
            "{:<12} {:>8}  {}",
            point.date.to_string(),
            format!("${}", point.price),
            "█".repeat(width).cyan()
        );
    }

    println!("{}", "-".repeat(53));

    let first = points.first().map(|p| p.price).unwrap_or(0);
    let current = points.last().map(|p| p.price).unwrap_or(0);
    let avg = points.iter().map(|p| f64::from(p.price)).sum::<f64>() / points.len() as f64;
    println!("Current: ${current}  Min: ${min}  Max: ${max}  Avg: ${avg:.0}");

    let change = i64::from(current) - i64::from(first);
    let percent = change as f64 / f64::from(first.max(1)) * 100.0;
    println!("Change since first observation: {change:+} ({percent:+.1}%)");
}
