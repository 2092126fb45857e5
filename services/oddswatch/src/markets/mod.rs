//! Odds normalization, market extraction and record assembly

pub mod odds_value;
pub mod types;
pub mod confidence;
pub mod moneyline;
pub mod binary;
pub mod correct_score;
pub mod assemble;
pub mod review_queue;
pub mod outputs;

pub use odds_value::{normalize, parse_plausible, OddsParseError, OddsValue};
pub use types::*;
pub use confidence::{compute_confidence, needs_review, ConfidenceLevel, MoneylineHeuristics, REVIEW_THRESHOLD};
pub use moneyline::{disambiguate, CandidateTriple, MoneylineSelection};
pub use binary::LabelVocabulary;
pub use correct_score::{extract_correct_score, CorrectScoreGrid};
pub use assemble::{assemble_record, extract_detail_markets, DetailMarkets};
