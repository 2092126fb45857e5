//! Two-legged markets: both-teams-to-score and over/under goal lines

use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use crate::markets::odds_value::{parse_plausible, OddsValue};
use crate::markets::types::{BttsOdds, GoalLine, TotalsOdds};
use crate::markup::section::BetUnit;

/// Label words a site prints on binary-market buttons
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelVocabulary {
    pub yes: Vec<String>,
    pub no: Vec<String>,
    pub over: Vec<String>,
    pub under: Vec<String>,
    /// Treat the first unit of a totals row as over and the second as under
    /// when the units carry no indicator word
    pub positional_totals: bool,
}

impl Default for LabelVocabulary {
    fn default() -> Self {
        Self {
            yes: words(&["ja", "yes"]),
            no: words(&["nein", "no"]),
            over: words(&["mehr", "über", "ueber", "over"]),
            under: words(&["weniger", "unter", "under"]),
            positional_totals: true,
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn in_vocab(word: &str, vocab: &[String]) -> bool {
    vocab.iter().any(|v| v.to_lowercase() == word)
}

/// Which side of a binary market a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryLeg {
    /// yes / over
    First,
    /// no / under
    Second,
}

impl LabelVocabulary {
    pub fn classify_btts(&self, label: &str) -> Option<BinaryLeg> {
        let label = label.trim().to_lowercase();
        if in_vocab(&label, &self.yes) {
            Some(BinaryLeg::First)
        } else if in_vocab(&label, &self.no) {
            Some(BinaryLeg::Second)
        } else {
            None
        }
    }

    /// Over/under indicator word anywhere in the label
    pub fn classify_totals(&self, label: &str) -> Option<BinaryLeg> {
        let label = label.to_lowercase();
        for token in label.split_whitespace() {
            if in_vocab(token, &self.over) {
                return Some(BinaryLeg::First);
            }
            if in_vocab(token, &self.under) {
                return Some(BinaryLeg::Second);
            }
        }
        None
    }
}

/// Legs collected for one binary market; either may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BinaryLegs {
    pub leg1: Option<OddsValue>,
    pub leg2: Option<OddsValue>,
}

impl BinaryLegs {
    fn set(&mut self, leg: BinaryLeg, value: OddsValue, market: &str) {
        let slot = match leg {
            BinaryLeg::First => &mut self.leg1,
            BinaryLeg::Second => &mut self.leg2,
        };
        if let Some(previous) = slot.replace(value) {
            tracing::warn!("{}: {:?} leg seen twice ({} then {}), keeping last", market, leg, previous, value);
        }
    }

    pub fn complete(&self) -> Option<(OddsValue, OddsValue)> {
        match (self.leg1, self.leg2) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leg1.is_none() && self.leg2.is_none()
    }
}

/// Collect yes/no legs from a BTTS section
pub fn extract_btts(units: &[BetUnit], vocab: &LabelVocabulary) -> BinaryLegs {
    let mut legs = BinaryLegs::default();

    for unit in units.iter().filter(|u| !u.spacer) {
        let Some(leg) = vocab.classify_btts(&unit.label) else {
            tracing::debug!("BTTS: ignoring unit with label {:?}", unit.label);
            continue;
        };
        if let Some(value) = parse_plausible(&unit.odds_text) {
            legs.set(leg, value, "BTTS");
        }
    }

    legs
}

fn threshold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+[,.]\d+)").expect("static threshold pattern"))
}

fn find_goal_line(text: &str) -> Option<GoalLine> {
    threshold_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| GoalLine::parse(m.as_str()))
}

/// Collect over/under legs per goal line from a totals section
pub fn extract_totals(units: &[BetUnit], vocab: &LabelVocabulary) -> BTreeMap<GoalLine, BinaryLegs> {
    let mut lines: BTreeMap<GoalLine, BinaryLegs> = BTreeMap::new();

    for unit in units.iter().filter(|u| !u.spacer) {
        let leg = match vocab.classify_totals(&unit.label) {
            Some(leg) => leg,
            None if vocab.positional_totals && unit.row_context.is_some() => match unit.position {
                0 => BinaryLeg::First,
                1 => BinaryLeg::Second,
                _ => {
                    tracing::debug!("Totals: unit at row position {} has no leg", unit.position);
                    continue;
                }
            },
            None => {
                tracing::debug!("Totals: ignoring unit with label {:?}", unit.label);
                continue;
            }
        };

        let line = find_goal_line(&unit.label)
            .or_else(|| unit.row_context.as_deref().and_then(find_goal_line));
        let Some(line) = line else {
            tracing::debug!("Totals: no half-goal line for unit {:?} / {:?}", unit.label, unit.row_context);
            continue;
        };

        if let Some(value) = parse_plausible(&unit.odds_text) {
            lines.entry(line).or_default().set(leg, value, "Totals");
        }
    }

    lines
}

pub fn complete_btts(legs: &BinaryLegs) -> Option<BttsOdds> {
    legs.complete().map(|(yes, no)| BttsOdds { yes, no })
}

/// Keep only goal lines with both legs; also return the incomplete lines
pub fn complete_totals(lines: &BTreeMap<GoalLine, BinaryLegs>) -> (BTreeMap<GoalLine, TotalsOdds>, Vec<GoalLine>) {
    let mut complete = BTreeMap::new();
    let mut partial = Vec::new();

    for (line, legs) in lines {
        match legs.complete() {
            Some((over, under)) => {
                complete.insert(*line, TotalsOdds { over, under });
            }
            None => partial.push(*line),
        }
    }

    (complete, partial)
}
