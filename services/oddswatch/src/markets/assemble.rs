//! Assemble overview rows and detail pages into odds records

use std::collections::BTreeMap;
use crate::markets::binary::{complete_btts, complete_totals, extract_btts, extract_totals};
use crate::markets::confidence::{ConfidenceLevel, MoneylineHeuristics};
use crate::markets::correct_score::extract_correct_score;
use crate::markets::moneyline::disambiguate;
use crate::markets::odds_value::{parse_odds_sequence, OddsValue};
use crate::markets::types::*;
use crate::markup::locator::MarketDocument;
use crate::markup::overview::OverviewRow;
use crate::site::traits::SiteAdapter;

/// Markets read from one event detail page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailMarkets {
    pub btts: Option<BttsOdds>,
    pub totals: BTreeMap<GoalLine, TotalsOdds>,
    pub correct_score: BTreeMap<String, OddsValue>,
    pub notes: Vec<String>,
}

/// Locate and extract every detail market the site labels
pub fn extract_detail_markets<S: SiteAdapter + ?Sized>(site: &S, doc: &MarketDocument) -> DetailMarkets {
    let mut out = DetailMarkets::default();

    for kind in MarketKind::detail_markets() {
        let Some(phrase) = site.market_phrase(kind) else {
            continue;
        };
        let Some(section) = doc.locate(phrase, site.markup()) else {
            out.notes.push(format!("{}: not offered", kind.as_str()));
            continue;
        };

        match kind {
            MarketKind::Btts => {
                let legs = extract_btts(&section.units, site.vocabulary());
                out.btts = complete_btts(&legs);
                if out.btts.is_none() {
                    out.notes.push("btts: incomplete yes/no pair".to_string());
                }
            }
            MarketKind::Totals => {
                let (complete, partial) = complete_totals(&extract_totals(&section.units, site.vocabulary()));
                for line in partial {
                    out.notes.push(format!("totals {}: incomplete over/under pair", line));
                }
                if complete.is_empty() {
                    out.notes.push("totals: no complete goal line".to_string());
                }
                out.totals = complete;
            }
            MarketKind::CorrectScore => {
                let grid = extract_correct_score(&section.units);
                for label in &grid.duplicates {
                    out.notes.push(format!("correct_score: duplicate label {}", label));
                }
                if grid.scores.is_empty() {
                    out.notes.push("correct_score: no score labels".to_string());
                }
                out.correct_score = grid.scores;
            }
            MarketKind::Moneyline => {}
        }
    }

    out
}

/// Build the record for one overview row, optionally enriched by its detail page
pub fn assemble_record<S: SiteAdapter + ?Sized>(
    site: &S,
    row: &OverviewRow,
    detail: Option<&MarketDocument>,
    heuristics: &MoneylineHeuristics,
    scraped_at: i64,
) -> MatchOddsRecord {
    let canonicalizer = site.canonicalizer();
    let mut record = MatchOddsRecord::new(site.name(), &row.event_id, scraped_at).with_teams(
        &row.home_raw,
        &row.away_raw,
        canonicalizer.canonicalize(&row.home_raw),
        canonicalizer.canonicalize(&row.away_raw),
    );
    record.raw_odds_count = row.odds_labels.len();

    let sequence = parse_odds_sequence(&row.odds_labels);
    match disambiguate(&sequence, heuristics) {
        Some(selection) => {
            if selection.is_fallback() {
                tracing::warn!(
                    "Event {}: no 1X2 candidate among {} odds, using positional fallback",
                    row.event_id,
                    sequence.len()
                );
                record = record.add_note("moneyline: positional fallback");
            }
            for rejected in selection.rejected() {
                record = record.add_note(&format!(
                    "moneyline: rejected candidate at position {} (score {:.1})",
                    rejected.position, rejected.confidence
                ));
            }
            record = record.with_moneyline(selection.odds, selection.confidence);
        }
        None => {
            record = record.add_note(&format!("moneyline: only {} plausible odds", sequence.len()));
        }
    }

    match detail {
        Some(doc) => {
            let markets = extract_detail_markets(site, doc);
            record = record
                .with_btts(markets.btts)
                .with_totals(markets.totals)
                .with_correct_score(markets.correct_score);
            for note in &markets.notes {
                record = record.add_note(note);
            }
        }
        None => {
            record = record.add_note("no detail page");
        }
    }

    tracing::debug!(
        "Assembled {} {} vs {}: markets {:?}",
        record.event_id,
        record.home_team,
        record.away_team,
        record.markets()
    );
    record
}

/// Split records into (confident, needs review)
pub fn partition_by_review(records: &[MatchOddsRecord]) -> (Vec<MatchOddsRecord>, Vec<MatchOddsRecord>) {
    records.iter().cloned().partition(|r| !r.needs_review())
}

/// Count records per moneyline confidence level; records without a moneyline are skipped
pub fn confidence_histogram(records: &[MatchOddsRecord]) -> BTreeMap<&'static str, usize> {
    let mut counts = BTreeMap::new();
    for confidence in records.iter().filter_map(|r| r.moneyline_confidence.as_ref()) {
        *counts.entry(ConfidenceLevel::of(confidence).as_str()).or_insert(0) += 1;
    }
    counts
}
