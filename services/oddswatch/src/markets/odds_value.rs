//! Odds text parsing and the plausible-range value type

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Lower bound of plausible decimal odds (exclusive)
pub const MIN_PLAUSIBLE_ODDS: f64 = 1.01;

/// Upper bound of plausible decimal odds (inclusive)
pub const MAX_PLAUSIBLE_ODDS: f64 = 50.0;

/// Why a raw odds string could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OddsParseError {
    #[error("empty odds text")]
    Empty,
    #[error("multiple decimal separators in {0:?}")]
    MultipleSeparators(String),
    #[error("non-numeric odds text {0:?}")]
    NotNumeric(String),
    #[error("malformed fractional odds {0:?}")]
    MalformedFraction(String),
    #[error("fractional odds component must be positive in {0:?}")]
    NonPositive(String),
    #[error("division by zero in {0:?}")]
    ZeroDenominator(String),
}

/// Decimal odds known to lie inside (1.01, 50.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OddsValue(f64);

impl OddsValue {
    /// Accepts a decimal odds value only if it is plausible
    pub fn new(value: f64) -> Option<Self> {
        if is_plausible(value) {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Implied probability, 1 / odds
    pub fn implied_probability(self) -> f64 {
        1.0 / self.0
    }
}

impl TryFrom<f64> for OddsValue {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("odds {} outside plausible range", value))
    }
}

impl From<OddsValue> for f64 {
    fn from(value: OddsValue) -> f64 {
        value.0
    }
}

impl fmt::Display for OddsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

pub fn is_plausible(value: f64) -> bool {
    value > MIN_PLAUSIBLE_ODDS && value <= MAX_PLAUSIBLE_ODDS
}

/// Parse a raw odds string into decimal odds.
///
/// Accepts "1.85", "1,85" and fractional "5/1" (returned as 6.0). The
/// plausible range is not enforced here.
pub fn normalize(raw: &str) -> Result<f64, OddsParseError> {
    let cleaned = raw.trim().replace(',', ".");
    if cleaned.is_empty() {
        return Err(OddsParseError::Empty);
    }

    if cleaned.contains('/') {
        let parts: Vec<&str> = cleaned.split('/').collect();
        if parts.len() != 2 {
            return Err(OddsParseError::MalformedFraction(raw.to_string()));
        }
        let numerator = parse_decimal(parts[0].trim(), raw)?;
        let denominator = parse_decimal(parts[1].trim(), raw)?;
        if denominator == 0.0 {
            return Err(OddsParseError::ZeroDenominator(raw.to_string()));
        }
        if numerator <= 0.0 {
            return Err(OddsParseError::NonPositive(raw.to_string()));
        }
        return Ok(numerator / denominator + 1.0);
    }

    parse_decimal(&cleaned, raw)
}

/// Strict decimal reader: ASCII digits with at most one dot
fn parse_decimal(text: &str, raw: &str) -> Result<f64, OddsParseError> {
    if text.is_empty() {
        return Err(OddsParseError::MalformedFraction(raw.to_string()));
    }
    if text.matches('.').count() > 1 {
        return Err(OddsParseError::MultipleSeparators(raw.to_string()));
    }
    if !text.chars().all(|c| c.is_ascii_digit() || c == '.') || !text.chars().any(|c| c.is_ascii_digit()) {
        return Err(OddsParseError::NotNumeric(raw.to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| OddsParseError::NotNumeric(raw.to_string()))
}

fn odds_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(\d+\s*/\s*\d+|\d{1,2}[,.]\d{1,2})\b").expect("static odds token pattern")
    })
}

/// Find the odds-looking token inside a noisy button label.
///
/// The text around the token must carry no digits or separators, so
/// "2.5.0" or "5/1/2" yield nothing and are rejected whole by `normalize`.
pub fn find_odds_token(text: &str) -> Option<&str> {
    let m = odds_token_regex().captures(text)?.get(1)?;
    let mut rest = text[..m.start()].chars().chain(text[m.end()..].chars());
    if rest.any(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '/')) {
        return None;
    }
    Some(m.as_str())
}

/// Parse a button label into plausible odds, if it holds any
pub fn parse_plausible(text: &str) -> Option<OddsValue> {
    let token = find_odds_token(text).unwrap_or(text);
    match normalize(token) {
        Ok(value) => {
            let odds = OddsValue::new(value);
            if odds.is_none() {
                tracing::debug!("Dropping implausible odds {} from {:?}", value, text);
            }
            odds
        }
        Err(e) => {
            tracing::debug!("Dropping odds text {:?}: {}", text, e);
            None
        }
    }
}

/// Map a row of raw button labels to the plausible odds they contain, in order
pub fn parse_odds_sequence<S: AsRef<str>>(labels: &[S]) -> Vec<OddsValue> {
    labels
        .iter()
        .filter_map(|label| parse_plausible(label.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_decimal() {
        assert_eq!(normalize("1,85"), Ok(1.85));
        assert_eq!(normalize(" 2.10 "), Ok(2.10));
        assert_eq!(normalize("3"), Ok(3.0));
    }

    #[test]
    fn test_normalize_fractional() {
        assert_eq!(normalize("5/1"), Ok(6.0));
        assert_eq!(normalize("1/2"), Ok(1.5));
        assert_eq!(normalize("11 / 4"), Ok(3.75));
    }

    #[test]
    fn test_normalize_rejects_malformed() {
        assert_eq!(normalize(""), Err(OddsParseError::Empty));
        assert_eq!(normalize("   "), Err(OddsParseError::Empty));
        assert!(matches!(normalize("2.5.0"), Err(OddsParseError::MultipleSeparators(_))));
        assert!(matches!(normalize("1,234.5"), Err(OddsParseError::MultipleSeparators(_))));
        assert!(matches!(normalize("abc"), Err(OddsParseError::NotNumeric(_))));
        assert!(matches!(normalize("inf"), Err(OddsParseError::NotNumeric(_))));
        assert!(matches!(normalize("-2.0"), Err(OddsParseError::NotNumeric(_))));
        assert!(matches!(normalize("5/0"), Err(OddsParseError::ZeroDenominator(_))));
        assert!(matches!(normalize("0/4"), Err(OddsParseError::NonPositive(_))));
        assert!(matches!(normalize("1/2/3"), Err(OddsParseError::MalformedFraction(_))));
        assert!(matches!(normalize("/3"), Err(OddsParseError::MalformedFraction(_))));
    }

    #[test]
    fn test_plausible_range_bounds() {
        assert!(OddsValue::new(1.01).is_none());
        assert!(OddsValue::new(1.02).is_some());
        assert!(OddsValue::new(50.0).is_some());
        assert!(OddsValue::new(50.01).is_none());
        assert!(OddsValue::new(f64::NAN).is_none());
    }

    #[test]
    fn test_odds_value_deserialize_enforces_range() {
        let ok: OddsValue = serde_json::from_str("1.85").unwrap();
        assert_eq!(ok.get(), 1.85);
        assert!(serde_json::from_str::<OddsValue>("1.0").is_err());
        assert!(serde_json::from_str::<OddsValue>("75.0").is_err());
    }

    #[test]
    fn test_find_odds_token() {
        assert_eq!(find_odds_token("Quote 1,85"), Some("1,85"));
        assert_eq!(find_odds_token("5/1"), Some("5/1"));
        assert_eq!(find_odds_token("kein Wert"), None);
        assert_eq!(find_odds_token("2.5.0"), None);
        assert_eq!(find_odds_token("Quote 1,85 (3)"), None);
    }

    #[test]
    fn test_malformed_labels_are_not_salvaged() {
        assert!(parse_plausible("2.5.0").is_none());
        assert!(parse_plausible("5/1/2").is_none());
        assert!(parse_plausible("1,85,3").is_none());
        assert!(parse_odds_sequence(&["2.5.0", "5/1/2", "1,85,3"]).is_empty());
        assert_eq!(parse_plausible("Quote 1,85").map(OddsValue::get), Some(1.85));
    }

    #[test]
    fn test_parse_odds_sequence_drops_noise() {
        let labels = ["1,80", "gesperrt", "3,40", "1,01", "4.20", "99,00", "2/1"];
        let values: Vec<f64> = parse_odds_sequence(&labels).into_iter().map(OddsValue::get).collect();
        assert_eq!(values, vec![1.80, 3.40, 4.20, 3.0]);
    }
}
