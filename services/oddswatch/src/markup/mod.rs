//! Reading captured bookmaker pages: selector profiles, section lookup and
//! overview rows

pub mod profile;
pub mod section;
pub mod locator;
pub mod overview;

pub use profile::{CompiledProfile, MarkupError, MarkupProfile};
pub use section::{BetUnit, MarketSection};
pub use locator::MarketDocument;
pub use overview::{parse_overview, OverviewRow};
