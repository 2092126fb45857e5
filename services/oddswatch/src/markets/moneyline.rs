//! 1X2 pattern disambiguation over an unlabeled run of odds

use crate::markets::confidence::{compute_confidence, MoneylineHeuristics};
use crate::markets::odds_value::OddsValue;
use crate::markets::types::{MoneylineConfidence, MoneylineOdds, SelectionTier};

/// A contiguous triple that passed the 1X2 filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateTriple {
    pub home: OddsValue,
    pub draw: OddsValue,
    pub away: OddsValue,
    pub position: usize,
    pub confidence: f64,
}

/// Outcome of disambiguating one match row
#[derive(Debug, Clone, PartialEq)]
pub struct MoneylineSelection {
    pub odds: MoneylineOdds,
    pub confidence: MoneylineConfidence,
    /// Every scored candidate, in sequence order
    pub candidates: Vec<CandidateTriple>,
}

impl MoneylineSelection {
    pub fn is_fallback(&self) -> bool {
        self.confidence.is_fallback()
    }

    /// Candidates that were scored but lost
    pub fn rejected(&self) -> impl Iterator<Item = &CandidateTriple> {
        let chosen = self.confidence.position;
        let fallback = self.is_fallback();
        self.candidates
            .iter()
            .filter(move |c| fallback || c.position != chosen)
    }
}

/// Score every contiguous triple that passes the hard filter
pub fn score_candidates(sequence: &[OddsValue], heuristics: &MoneylineHeuristics) -> Vec<CandidateTriple> {
    sequence
        .windows(3)
        .enumerate()
        .filter_map(|(position, w)| {
            let (home, draw, away) = (w[0], w[1], w[2]);
            if !heuristics.admits(home.get(), draw.get(), away.get()) {
                return None;
            }
            Some(CandidateTriple {
                home,
                draw,
                away,
                position,
                confidence: compute_confidence(home.get(), draw.get(), away.get(), heuristics),
            })
        })
        .collect()
}

/// Pick the most plausible (home, draw, away) triple.
///
/// The highest confidence wins and the earliest position breaks ties. When
/// no triple passes the filter the first three values are used and the
/// selection is tagged as fallback. Returns `None` with fewer than three values.
pub fn disambiguate(sequence: &[OddsValue], heuristics: &MoneylineHeuristics) -> Option<MoneylineSelection> {
    if sequence.len() < 3 {
        return None;
    }

    let candidates = score_candidates(sequence, heuristics);

    let mut best: Option<&CandidateTriple> = None;
    for candidate in &candidates {
        match best {
            Some(b) if candidate.confidence <= b.confidence => {}
            _ => best = Some(candidate),
        }
    }

    let (odds, confidence) = match best {
        Some(b) => (
            MoneylineOdds { home: b.home, draw: b.draw, away: b.away },
            MoneylineConfidence {
                score: b.confidence,
                tier: SelectionTier::Scored,
                position: b.position,
            },
        ),
        None => (
            MoneylineOdds { home: sequence[0], draw: sequence[1], away: sequence[2] },
            MoneylineConfidence {
                score: 0.0,
                tier: SelectionTier::Fallback,
                position: 0,
            },
        ),
    };

    Some(MoneylineSelection { odds, confidence, candidates })
}
