//! Correct-score grid extraction

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use crate::markets::odds_value::{parse_plausible, OddsValue};
use crate::markup::section::BetUnit;

fn score_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+:\d+$").expect("static score label pattern"))
}

/// True for labels of the form "H:A"
pub fn is_score_label(label: &str) -> bool {
    score_label_regex().is_match(label)
}

/// Result of reading a correct-score grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectScoreGrid {
    pub scores: BTreeMap<String, OddsValue>,
    /// Labels seen more than once in the section
    pub duplicates: Vec<String>,
}

/// Map score labels to odds. Later duplicates overwrite earlier ones.
///
/// Every repeated label is reported in `duplicates`. A repeat whose odds
/// text is unreadable or implausible is dropped before it can overwrite, so
/// the last readable value wins.
pub fn extract_correct_score(units: &[BetUnit]) -> CorrectScoreGrid {
    let mut grid = CorrectScoreGrid::default();
    let mut seen = HashSet::new();

    for unit in units {
        let label = unit.label.trim();
        if unit.spacer || label.is_empty() {
            continue;
        }
        if !is_score_label(label) {
            tracing::debug!("Correct score: skipping label {:?}", label);
            continue;
        }
        if !seen.insert(label.to_string()) {
            tracing::warn!("Correct score {} seen more than once", label);
            grid.duplicates.push(label.to_string());
        }
        let Some(value) = parse_plausible(&unit.odds_text) else {
            continue;
        };
        if let Some(previous) = grid.scores.insert(label.to_string(), value) {
            tracing::debug!("Correct score {}: {} replaced by {}", label, previous, value);
        }
    }

    grid
}
