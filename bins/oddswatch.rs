//! Odds extraction CLI
//!
//! Usage:
//!   oddswatch normalize 1,85 5/1 2.5.0
//!   oddswatch canonicalize --site win2day "FK Austria Wien" "SK Rapid Wien"
//!   oddswatch disambiguate 1.80 3.40 4.20 1.90 3.60 4.00
//!   oddswatch extract --site tipp3 --snapshot-dir snapshots/2024-03-02 --date 2024-03-02
//!   oddswatch match --records a.jsonl --candidates b.jsonl --threshold 85

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use oddswatch::config::Config;
use oddswatch::markets::{
    assemble::{confidence_histogram, partition_by_review},
    moneyline::disambiguate,
    odds_value::{normalize, parse_odds_sequence},
    outputs::{load_records, records_path, supersede, write_records_jsonl},
    review_queue::{collect_review_items, write_review_queue, ReviewStats},
    ConfidenceLevel,
};
use oddswatch::site::SiteAdapter;
use oddswatch::snapshot::load_snapshot;
use oddswatch::teams::{FixtureCandidate, FixtureMatcher};

#[derive(Parser)]
#[command(name = "oddswatch")]
#[command(about = "Extract and reconcile football odds from captured bookmaker pages")]
struct Cli {
    /// TOML config; built-in presets are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw odds strings to decimal odds
    Normalize {
        raw: Vec<String>,
    },
    /// Canonicalize team names with a site's alias table
    Canonicalize {
        #[arg(long)]
        site: String,
        names: Vec<String>,
    },
    /// Pick the 1X2 triple out of a row of odds
    Disambiguate {
        values: Vec<String>,
    },
    /// Extract records from a captured snapshot directory
    Extract {
        #[arg(long)]
        site: String,
        #[arg(long)]
        snapshot_dir: PathBuf,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        data_dir: Option<String>,
        /// Keep records of events missing from this pass
        #[arg(long)]
        merge: bool,
    },
    /// Match fixtures between two record files
    Match {
        #[arg(long)]
        records: PathBuf,
        #[arg(long)]
        candidates: PathBuf,
        #[arg(long)]
        threshold: Option<u8>,
    },
}

fn get_date(date: Option<String>) -> String {
    date.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string())
}

fn run_normalize_command(raw: &[String]) {
    for value in raw {
        match normalize(value) {
            Ok(odds) => println!("{:<12} {:.2}", value, odds),
            Err(e) => println!("{:<12} error: {}", value, e),
        }
    }
}

fn run_canonicalize_command(config: &Config, site: &str, names: &[String]) -> Result<()> {
    let site = config.site(site)?;
    for name in names {
        println!("{} -> {}", name, site.canonicalizer().canonicalize(name));
    }
    Ok(())
}

fn run_disambiguate_command(config: &Config, values: &[String]) {
    let sequence = parse_odds_sequence(values);
    if sequence.len() < values.len() {
        println!("Dropped {} implausible values", values.len() - sequence.len());
    }

    let Some(selection) = disambiguate(&sequence, &config.moneyline) else {
        println!("Need at least 3 plausible odds, got {}", sequence.len());
        return;
    };

    for candidate in &selection.candidates {
        let chosen = !selection.is_fallback() && candidate.position == selection.confidence.position;
        println!(
            "{} pos {} ({}, {}, {}) score {:.1}",
            if chosen { "*" } else { " " },
            candidate.position,
            candidate.home,
            candidate.draw,
            candidate.away,
            candidate.confidence
        );
    }

    let odds = &selection.odds;
    println!(
        "Selected ({}, {}, {}) at position {}: {} [{}]",
        odds.home,
        odds.draw,
        odds.away,
        selection.confidence.position,
        ConfidenceLevel::of(&selection.confidence).as_str(),
        if selection.is_fallback() { "fallback" } else { "scored" }
    );
}

fn run_extract_command(
    config: &Config,
    site_name: &str,
    snapshot_dir: &Path,
    date: &str,
    data_dir: &Path,
    merge: bool,
) -> Result<()> {
    let site = config.site(site_name)?;
    let snapshot = load_snapshot(snapshot_dir)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} events {msg}")?
            .progress_chars("=> "),
    );
    pb.set_message(site_name.to_string());

    let scraped_at = Utc::now().timestamp_millis();
    let mut records = snapshot.extract(&site, &config.moneyline, scraped_at, Some(&pb));
    pb.finish_and_clear();

    if merge {
        let existing_path = records_path(data_dir, site.name(), date);
        if existing_path.exists() {
            records = supersede(load_records(&existing_path)?, records);
        }
    }

    write_records_jsonl(data_dir, site.name(), date, &records)?;

    let review_items = collect_review_items(&records);
    write_review_queue(data_dir, site.name(), date, &review_items)?;

    let (confident, _) = partition_by_review(&records);
    let stats = ReviewStats::from_items(&review_items);
    println!(
        "{}: {} records, {} confident, {} for review ({} fallback)",
        site.name(),
        records.len(),
        confident.len(),
        stats.total,
        stats.fallback
    );
    for (level, count) in confidence_histogram(&records) {
        println!("  {:<9} {}", level, count);
    }

    Ok(())
}

fn run_match_command(config: &Config, records: &Path, candidates: &Path, threshold: u8) -> Result<()> {
    let records = load_records(records)?;
    let others = load_records(candidates)?;

    let candidates: Vec<FixtureCandidate<&str>> = others
        .iter()
        .map(|r| FixtureCandidate::new(&r.home_team, &r.away_team, r.event_id.as_str()))
        .collect();
    let matcher = FixtureMatcher::new(config.match_canonicalizer());

    let mut matched = 0;
    for record in &records {
        match matcher.find_best(&record.home_team, &record.away_team, &candidates, threshold) {
            Some(m) => {
                matched += 1;
                println!(
                    "{} {} vs {} -> {} {} vs {} (score {:.1}{})",
                    record.event_id,
                    record.home_team,
                    record.away_team,
                    m.candidate.payload,
                    m.candidate.home,
                    m.candidate.away,
                    m.score,
                    if m.swapped { ", swapped" } else { "" }
                );
            }
            None => println!("{} {} vs {} -> no match", record.event_id, record.home_team, record.away_team),
        }
    }

    println!("Matched {}/{} fixtures at threshold {}", matched, records.len(), threshold);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Normalize { raw } => run_normalize_command(&raw),
        Commands::Canonicalize { site, names } => run_canonicalize_command(&config, &site, &names)?,
        Commands::Disambiguate { values } => run_disambiguate_command(&config, &values),
        Commands::Extract { site, snapshot_dir, date, data_dir, merge } => {
            let date = get_date(date);
            let data_dir = PathBuf::from(data_dir.unwrap_or_else(|| config.data_dir.clone()));
            run_extract_command(&config, &site, &snapshot_dir, &date, &data_dir, merge)?;
        }
        Commands::Match { records, candidates, threshold } => {
            let threshold = threshold.unwrap_or(config.matching.threshold);
            run_match_command(&config, &records, &candidates, threshold)?;
        }
    }

    Ok(())
}
