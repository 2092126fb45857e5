//! Core market types for extracted odds records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use crate::markets::odds_value::OddsValue;

/// Supported betting markets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    Moneyline,
    Btts,
    Totals,
    CorrectScore,
}

impl MarketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketKind::Moneyline => "moneyline",
            MarketKind::Btts => "btts",
            MarketKind::Totals => "totals",
            MarketKind::CorrectScore => "correct_score",
        }
    }

    /// Markets read from an event detail page
    pub fn detail_markets() -> [MarketKind; 3] {
        [MarketKind::Btts, MarketKind::Totals, MarketKind::CorrectScore]
    }
}

/// Over/under goal line, a positive half-integer such as 2.5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GoalLine {
    halves: u32, // threshold * 2, always odd
}

impl GoalLine {
    pub fn from_f64(threshold: f64) -> Option<Self> {
        let doubled = threshold * 2.0;
        if !doubled.is_finite() || doubled <= 0.0 || doubled.fract() != 0.0 || doubled > u32::MAX as f64 {
            return None;
        }
        let halves = doubled as u32;
        if halves % 2 == 1 {
            Some(Self { halves })
        } else {
            None
        }
    }

    /// Parse "2,5" or "2.5"
    pub fn parse(text: &str) -> Option<Self> {
        let cleaned = text.trim().replace(',', ".");
        if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return None;
        }
        cleaned.parse::<f64>().ok().and_then(Self::from_f64)
    }

    pub fn value(&self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl fmt::Display for GoalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.5", self.halves / 2)
    }
}

impl TryFrom<String> for GoalLine {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        GoalLine::parse(&value).ok_or_else(|| format!("invalid goal line {:?}", value))
    }
}

impl From<GoalLine> for String {
    fn from(line: GoalLine) -> String {
        line.to_string()
    }
}

/// 1X2 odds triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneylineOdds {
    pub home: OddsValue,
    pub draw: OddsValue,
    pub away: OddsValue,
}

impl MoneylineOdds {
    pub fn implied_sum(&self) -> f64 {
        self.home.implied_probability() + self.draw.implied_probability() + self.away.implied_probability()
    }
}

/// Both-teams-to-score pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BttsOdds {
    pub yes: OddsValue,
    pub no: OddsValue,
}

/// Over/under pair for one goal line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsOdds {
    pub over: OddsValue,
    pub under: OddsValue,
}

/// How a moneyline triple was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTier {
    Scored,
    Fallback,
}

/// Confidence attached to a moneyline selection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoneylineConfidence {
    pub score: f64,
    pub tier: SelectionTier,
    pub position: usize,
}

impl MoneylineConfidence {
    pub fn is_fallback(&self) -> bool {
        self.tier == SelectionTier::Fallback
    }
}

/// Odds extracted for one fixture in one scrape pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOddsRecord {
    pub site: String,
    pub event_id: String,
    pub home_team: String,
    pub away_team: String,
    pub home_raw: String,
    pub away_raw: String,
    pub moneyline: Option<MoneylineOdds>,
    pub moneyline_confidence: Option<MoneylineConfidence>,
    pub btts: Option<BttsOdds>,
    #[serde(default)]
    pub totals: BTreeMap<GoalLine, TotalsOdds>,
    #[serde(default)]
    pub correct_score: BTreeMap<String, OddsValue>,
    pub raw_odds_count: usize,
    pub snapshot_hash: Option<String>,
    pub scraped_at: i64,         // epoch ms
    #[serde(default)]
    pub parse_notes: Vec<String>,
}

impl MatchOddsRecord {
    pub fn new(site: &str, event_id: &str, scraped_at: i64) -> Self {
        Self {
            site: site.to_string(),
            event_id: event_id.to_string(),
            home_team: String::new(),
            away_team: String::new(),
            home_raw: String::new(),
            away_raw: String::new(),
            moneyline: None,
            moneyline_confidence: None,
            btts: None,
            totals: BTreeMap::new(),
            correct_score: BTreeMap::new(),
            raw_odds_count: 0,
            snapshot_hash: None,
            scraped_at,
            parse_notes: Vec::new(),
        }
    }

    pub fn with_teams(mut self, home_raw: &str, away_raw: &str, home: String, away: String) -> Self {
        self.home_raw = home_raw.to_string();
        self.away_raw = away_raw.to_string();
        self.home_team = home;
        self.away_team = away;
        self
    }

    pub fn with_moneyline(mut self, odds: MoneylineOdds, confidence: MoneylineConfidence) -> Self {
        self.moneyline = Some(odds);
        self.moneyline_confidence = Some(confidence);
        self
    }

    pub fn with_btts(mut self, btts: Option<BttsOdds>) -> Self {
        self.btts = btts;
        self
    }

    pub fn with_totals(mut self, totals: BTreeMap<GoalLine, TotalsOdds>) -> Self {
        self.totals = totals;
        self
    }

    pub fn with_correct_score(mut self, scores: BTreeMap<String, OddsValue>) -> Self {
        self.correct_score = scores;
        self
    }

    pub fn with_snapshot_hash(mut self, hash: Option<String>) -> Self {
        self.snapshot_hash = hash;
        self
    }

    pub fn add_note(mut self, note: &str) -> Self {
        self.parse_notes.push(note.to_string());
        self
    }

    /// Markets that made it into this record
    pub fn markets(&self) -> Vec<MarketKind> {
        let mut kinds = Vec::new();
        if self.moneyline.is_some() {
            kinds.push(MarketKind::Moneyline);
        }
        if self.btts.is_some() {
            kinds.push(MarketKind::Btts);
        }
        if !self.totals.is_empty() {
            kinds.push(MarketKind::Totals);
        }
        if !self.correct_score.is_empty() {
            kinds.push(MarketKind::CorrectScore);
        }
        kinds
    }

    /// Every odds value held by the record
    pub fn all_odds(&self) -> Vec<OddsValue> {
        let mut out = Vec::new();
        if let Some(ml) = &self.moneyline {
            out.extend([ml.home, ml.draw, ml.away]);
        }
        if let Some(b) = &self.btts {
            out.extend([b.yes, b.no]);
        }
        for t in self.totals.values() {
            out.extend([t.over, t.under]);
        }
        out.extend(self.correct_score.values().copied());
        out
    }

    /// Check if the moneyline needs manual review
    pub fn needs_review(&self) -> bool {
        self.moneyline_confidence
            .map(|c| crate::markets::confidence::needs_review(&c))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(v: f64) -> OddsValue {
        OddsValue::new(v).unwrap()
    }

    #[test]
    fn test_goal_line_parse() {
        assert_eq!(GoalLine::parse("2,5").unwrap().value(), 2.5);
        assert_eq!(GoalLine::parse("0.5").unwrap().to_string(), "0.5");
        assert_eq!(GoalLine::parse("10.5").unwrap().to_string(), "10.5");
        assert!(GoalLine::parse("2.0").is_none());
        assert!(GoalLine::parse("2.25").is_none());
        assert!(GoalLine::parse("-1.5").is_none());
        assert!(GoalLine::parse("").is_none());
    }

    #[test]
    fn test_record_serializes_goal_line_keys() {
        let mut totals = BTreeMap::new();
        totals.insert(GoalLine::parse("2.5").unwrap(), TotalsOdds { over: odds(1.9), under: odds(1.95) });
        let record = MatchOddsRecord::new("tipp3", "42", 0).with_totals(totals);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"2.5\""));

        let back: MatchOddsRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_markets_and_all_odds() {
        let record = MatchOddsRecord::new("tipp3", "1", 0)
            .with_moneyline(
                MoneylineOdds { home: odds(2.0), draw: odds(3.4), away: odds(3.6) },
                MoneylineConfidence { score: 9.0, tier: SelectionTier::Scored, position: 0 },
            )
            .with_btts(Some(BttsOdds { yes: odds(1.8), no: odds(2.1) }));

        assert_eq!(record.markets(), vec![MarketKind::Moneyline, MarketKind::Btts]);
        assert_eq!(record.all_odds().len(), 5);
        assert!(!record.needs_review());
    }
}
