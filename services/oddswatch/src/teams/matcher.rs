//! Cross-source fixture matching on team-name similarity

use strsim::normalized_levenshtein;
use crate::teams::canonical::Canonicalizer;

/// Default minimum similarity (0..=100) for a fixture match
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

/// One fixture from the other source
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureCandidate<P> {
    pub home: String,
    pub away: String,
    pub payload: P,
}

impl<P> FixtureCandidate<P> {
    pub fn new(home: &str, away: &str, payload: P) -> Self {
        Self {
            home: home.to_string(),
            away: away.to_string(),
            payload,
        }
    }
}

/// Winning candidate of a fixture lookup
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureMatch<'a, P> {
    pub index: usize,
    pub score: f64,
    /// Home/away were reversed in the candidate
    pub swapped: bool,
    pub candidate: &'a FixtureCandidate<P>,
}

/// Similarity of two names on a 0..=100 scale.
///
/// Edit-distance based, so it runs stricter than a matching-blocks ratio
/// on partial spellings: "Rapid Wien" vs "Rapid Vienna" scores 75, not 82.
pub fn name_similarity(a: &str, b: &str) -> f64 {
    (normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase()) * 100.0).round()
}

/// Matches fixtures across sources after canonicalizing both sides
#[derive(Debug, Clone)]
pub struct FixtureMatcher {
    canonicalizer: Canonicalizer,
}

impl FixtureMatcher {
    pub fn new(canonicalizer: Canonicalizer) -> Self {
        Self { canonicalizer }
    }

    /// (straight, swapped) similarity of a fixture pair
    pub fn orientation_scores(&self, home_a: &str, away_a: &str, home_b: &str, away_b: &str) -> (f64, f64) {
        let home_a = self.canonicalizer.canonicalize(home_a);
        let away_a = self.canonicalizer.canonicalize(away_a);
        let home_b = self.canonicalizer.canonicalize(home_b);
        let away_b = self.canonicalizer.canonicalize(away_b);

        let straight = (name_similarity(&home_a, &home_b) + name_similarity(&away_a, &away_b)) / 2.0;
        let swapped = (name_similarity(&home_a, &away_b) + name_similarity(&away_a, &home_b)) / 2.0;
        (straight, swapped)
    }

    /// Best candidate scoring at least `threshold`; earliest wins ties
    pub fn find_best<'a, P>(
        &self,
        home: &str,
        away: &str,
        candidates: &'a [FixtureCandidate<P>],
        threshold: u8,
    ) -> Option<FixtureMatch<'a, P>> {
        let threshold = f64::from(threshold.min(100));
        let mut best: Option<FixtureMatch<'a, P>> = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let (straight, swapped) = self.orientation_scores(home, away, &candidate.home, &candidate.away);
            let score = straight.max(swapped);
            if score < threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(FixtureMatch {
                    index,
                    score,
                    swapped: swapped > straight,
                    candidate,
                });
            }
        }

        match &best {
            Some(m) => tracing::debug!(
                "Matched {} vs {} to {} vs {} (score {:.1}, swapped {})",
                home, away, m.candidate.home, m.candidate.away, m.score, m.swapped
            ),
            None => tracing::debug!("No fixture match for {} vs {}", home, away),
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::canonical::{AliasTable, CanonicalizerConfig};

    fn matcher() -> FixtureMatcher {
        FixtureMatcher::new(Canonicalizer::new(&CanonicalizerConfig::default()))
    }

    #[test]
    fn test_swapped_orientation() {
        let candidates = vec![FixtureCandidate::new("Austria Wien", "Sturm Graz", "api-1")];
        let m = matcher()
            .find_best("Sturm Graz", "Austria Wien", &candidates, 80)
            .unwrap();

        assert!(m.swapped);
        assert_eq!(m.score, 100.0);
        assert_eq!(m.candidate.payload, "api-1");
    }

    #[test]
    fn test_straight_orientation_with_spelling_noise() {
        let candidates = vec![
            FixtureCandidate::new("Rapid Wien", "LASK", 1),
            FixtureCandidate::new("SK Sturm Graz", "FK Austria Wien", 2),
        ];
        let m = matcher()
            .find_best("Sturm Graz", "Austria Wien", &candidates, 80)
            .unwrap();

        assert_eq!(m.index, 1);
        assert!(!m.swapped);
        assert_eq!(m.candidate.payload, 2);
    }

    #[test]
    fn test_below_threshold() {
        let candidates = vec![FixtureCandidate::new("Rapid Wien", "LASK", ())];
        assert!(matcher().find_best("Sturm Graz", "Austria Wien", &candidates, 80).is_none());
        assert!(matcher().find_best("Sturm Graz", "Austria Wien", &Vec::<FixtureCandidate<()>>::new(), 0).is_none());
    }

    #[test]
    fn test_tie_keeps_first() {
        let candidates = vec![
            FixtureCandidate::new("Sturm Graz", "Austria Wien", "first"),
            FixtureCandidate::new("Sturm Graz", "Austria Wien", "second"),
        ];
        let m = matcher().find_best("Sturm Graz", "Austria Wien", &candidates, 80).unwrap();
        assert_eq!(m.candidate.payload, "first");
    }

    #[test]
    fn test_aliases_applied_before_scoring() {
        let config = CanonicalizerConfig {
            aliases: AliasTable::from_pairs(&[("RB Salzburg", "Red Bull Salzburg")]),
            ..Default::default()
        };
        let matcher = FixtureMatcher::new(Canonicalizer::new(&config));
        let (straight, _) = matcher.orientation_scores("RB Salzburg", "LASK", "Red Bull Salzburg", "LASK");
        assert_eq!(straight, 100.0);
    }

    #[test]
    fn test_name_similarity_scale() {
        assert_eq!(name_similarity("Sturm Graz", "sturm graz"), 100.0);
        assert_eq!(name_similarity("", ""), 100.0);
        assert!(name_similarity("Sturm Graz", "LASK") < 50.0);
    }

    #[test]
    fn test_partial_spelling_stays_below_default_threshold() {
        assert_eq!(name_similarity("Rapid Wien", "Rapid Vienna"), 75.0);

        let plain = FixtureMatcher::new(Canonicalizer::new(&CanonicalizerConfig::default()));
        let candidates = vec![FixtureCandidate::new("Rapid Vienna", "Austria Vienna", ())];
        assert!(plain
            .find_best("Rapid Wien", "Austria Wien", &candidates, DEFAULT_MATCH_THRESHOLD)
            .is_none());
    }
}
