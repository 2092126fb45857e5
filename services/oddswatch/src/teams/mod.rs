pub mod canonical;
pub mod matcher;

pub use canonical::{AliasTable, Canonicalizer, CanonicalizerConfig};
pub use matcher::{name_similarity, FixtureCandidate, FixtureMatch, FixtureMatcher, DEFAULT_MATCH_THRESHOLD};
