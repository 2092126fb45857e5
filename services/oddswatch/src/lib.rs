//! Odds extraction for Austrian football betting pages
//!
//! Reads captured bookmaker pages, picks the 1X2 triple out of each fixture's
//! odds row, extracts BTTS, over/under and correct-score markets, canonicalizes
//! team names and matches fixtures across sources.

pub mod config;
pub mod markets;
pub mod markup;
pub mod site;
pub mod snapshot;
pub mod teams;
