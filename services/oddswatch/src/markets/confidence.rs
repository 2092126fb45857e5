//! Confidence scoring for 1X2 candidate triples

use serde::Deserialize;
use crate::markets::types::MoneylineConfidence;

/// Inclusive numeric band
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

pub const HOME_FILTER: Band = Band::new(1.2, 6.0);
pub const DRAW_FILTER: Band = Band::new(2.8, 5.5);
pub const AWAY_FILTER: Band = Band::new(1.2, 8.0);
pub const DRAW_DOMINANCE_RATIO: f64 = 0.9;

pub const HOME_TYPICAL: Band = Band::new(1.2, 5.0);
pub const DRAW_TYPICAL: Band = Band::new(2.8, 4.8);
pub const AWAY_TYPICAL: Band = Band::new(1.2, 6.0);
pub const MARGIN_TIGHT: Band = Band::new(1.05, 1.15);
pub const MARGIN_LOOSE: Band = Band::new(1.00, 1.20);

/// Thresholds used to filter and score 1X2 candidates.
///
/// Tuned against one bookmaker's pages; override per deployment in the
/// `[moneyline]` config table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MoneylineHeuristics {
    pub home_filter: Band,
    pub draw_filter: Band,
    pub away_filter: Band,
    pub draw_dominance_ratio: f64,
    pub home_typical: Band,
    pub draw_typical: Band,
    pub away_typical: Band,
    pub margin_tight: Band,
    pub margin_loose: Band,
    pub draw_highest_bonus: f64,
    pub draw_near_highest_bonus: f64,
    pub home_typical_bonus: f64,
    pub draw_typical_bonus: f64,
    pub away_typical_bonus: f64,
    pub margin_tight_bonus: f64,
    pub margin_loose_bonus: f64,
}

impl Default for MoneylineHeuristics {
    fn default() -> Self {
        Self {
            home_filter: HOME_FILTER,
            draw_filter: DRAW_FILTER,
            away_filter: AWAY_FILTER,
            draw_dominance_ratio: DRAW_DOMINANCE_RATIO,
            home_typical: HOME_TYPICAL,
            draw_typical: DRAW_TYPICAL,
            away_typical: AWAY_TYPICAL,
            margin_tight: MARGIN_TIGHT,
            margin_loose: MARGIN_LOOSE,
            draw_highest_bonus: 3.0,
            draw_near_highest_bonus: 1.5,
            home_typical_bonus: 1.0,
            draw_typical_bonus: 2.0,
            away_typical_bonus: 1.0,
            margin_tight_bonus: 2.0,
            margin_loose_bonus: 1.0,
        }
    }
}

impl MoneylineHeuristics {
    fn draw_dominates(&self, home: f64, draw: f64, away: f64) -> bool {
        draw >= home.max(away) * self.draw_dominance_ratio
    }

    /// Hard filter a triple must pass before it is scored
    pub fn admits(&self, home: f64, draw: f64, away: f64) -> bool {
        self.home_filter.contains(home)
            && self.draw_filter.contains(draw)
            && self.away_filter.contains(away)
            && self.draw_dominates(home, draw, away)
    }
}

/// Compute confidence score for a (home, draw, away) candidate
///
/// Scoring rules (defaults):
/// - +3.0 if draw exceeds both sides, else +1.5 if draw >= 0.9 * max side
/// - +1.0 home in [1.2, 5.0]
/// - +2.0 draw in [2.8, 4.8]
/// - +1.0 away in [1.2, 6.0]
/// - +2.0 if implied sum in [1.05, 1.15], else +1.0 if in [1.00, 1.20]
pub fn compute_confidence(home: f64, draw: f64, away: f64, h: &MoneylineHeuristics) -> f64 {
    let mut score = 0.0;

    if draw > home && draw > away {
        score += h.draw_highest_bonus;
    } else if h.draw_dominates(home, draw, away) {
        score += h.draw_near_highest_bonus;
    }

    if h.home_typical.contains(home) {
        score += h.home_typical_bonus;
    }
    if h.draw_typical.contains(draw) {
        score += h.draw_typical_bonus;
    }
    if h.away_typical.contains(away) {
        score += h.away_typical_bonus;
    }

    let implied_sum = 1.0 / home + 1.0 / draw + 1.0 / away;
    if h.margin_tight.contains(implied_sum) {
        score += h.margin_tight_bonus;
    } else if h.margin_loose.contains(implied_sum) {
        score += h.margin_loose_bonus;
    }

    score
}

/// Scores below this are routed to human review
pub const REVIEW_THRESHOLD: f64 = 5.0;

/// Check if a moneyline selection needs review
pub fn needs_review(confidence: &MoneylineConfidence) -> bool {
    confidence.is_fallback() || confidence.score < REVIEW_THRESHOLD
}

/// Confidence level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceLevel {
    High,     // >= 8.0
    Medium,   // >= 6.0
    Low,      // >= REVIEW_THRESHOLD
    VeryLow,  // below review threshold, or fallback
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ConfidenceLevel::High
        } else if score >= 6.0 {
            ConfidenceLevel::Medium
        } else if score >= REVIEW_THRESHOLD {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::VeryLow
        }
    }

    pub fn of(confidence: &MoneylineConfidence) -> Self {
        if confidence.is_fallback() {
            ConfidenceLevel::VeryLow
        } else {
            Self::from_score(confidence.score)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
            ConfidenceLevel::VeryLow => "very_low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::types::SelectionTier;

    #[test]
    fn test_full_score() {
        let h = MoneylineHeuristics::default();
        // draw highest, all typical, implied sum ~1.0585
        let score = compute_confidence(3.40, 4.20, 1.90, &h);
        assert_eq!(score, 9.0);
    }

    #[test]
    fn test_near_highest_draw() {
        let h = MoneylineHeuristics::default();
        // 3.6 == 0.9 * 4.0, implied sum ~1.0541
        let score = compute_confidence(1.90, 3.60, 4.00, &h);
        assert_eq!(score, 7.5);
    }

    #[test]
    fn test_loose_margin_band() {
        let h = MoneylineHeuristics::default();
        // implied sum ~1.1905 sits only in the loose band
        let score = compute_confidence(2.0, 3.0, 2.8, &h);
        assert_eq!(score, 8.0);
    }

    #[test]
    fn test_filter() {
        let h = MoneylineHeuristics::default();
        assert!(h.admits(3.4, 4.2, 1.9));
        assert!(!h.admits(1.8, 3.4, 4.2)); // draw below 0.9 * away
        assert!(!h.admits(9.5, 9.6, 9.7));
        assert!(!h.admits(4.2, 1.9, 3.6));
    }

    #[test]
    fn test_heuristics_override_from_toml() {
        let h: MoneylineHeuristics = toml::from_str(
            r#"
draw_dominance_ratio = 0.8
[draw_filter]
min = 2.5
max = 6.0
"#,
        )
        .unwrap();
        assert_eq!(h.draw_dominance_ratio, 0.8);
        assert_eq!(h.draw_filter, Band::new(2.5, 6.0));
        assert_eq!(h.home_filter, HOME_FILTER);
    }

    #[test]
    fn test_needs_review() {
        let scored = MoneylineConfidence { score: 9.0, tier: SelectionTier::Scored, position: 0 };
        let weak = MoneylineConfidence { score: 4.5, tier: SelectionTier::Scored, position: 0 };
        let fallback = MoneylineConfidence { score: 0.0, tier: SelectionTier::Fallback, position: 0 };
        assert!(!needs_review(&scored));
        assert!(needs_review(&weak));
        assert!(needs_review(&fallback));
    }

    #[test]
    fn test_confidence_level() {
        assert_eq!(ConfidenceLevel::from_score(9.0), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(7.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(5.5), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(2.0), ConfidenceLevel::VeryLow);
        let fallback = MoneylineConfidence { score: 9.0, tier: SelectionTier::Fallback, position: 0 };
        assert_eq!(ConfidenceLevel::of(&fallback), ConfidenceLevel::VeryLow);
    }
}
