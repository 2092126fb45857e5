//! Team name canonicalization via alias tables and affix stripping

use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Raw spelling → canonical name, read-only once built
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    pub fn get(&self, raw: &str) -> Option<&str> {
        self.entries.get(raw).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn targets(&self) -> HashSet<String> {
        self.entries.values().cloned().collect()
    }

    /// Same table with keys and targets whitespace-collapsed
    fn collapsed(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(raw, canonical)| (collapse(raw), collapse(canonical)))
                .filter(|(raw, canonical)| !raw.is_empty() && !canonical.is_empty())
                .collect(),
        }
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Alias table plus the affixes a site's names carry
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanonicalizerConfig {
    pub aliases: AliasTable,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    /// Drop trailing founding years such as "1909"
    pub strip_years: bool,
}

impl Default for CanonicalizerConfig {
    fn default() -> Self {
        Self {
            aliases: AliasTable::new(),
            prefixes: ["FC", "FK", "SK", "SV", "1.", "TSV", "VfB", "VfL", "SSC", "AC", "AS", "CF"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            suffixes: ["FC", "e.V."].iter().map(|s| s.to_string()).collect(),
            strip_years: true,
        }
    }
}

/// Maps observed team names onto one canonical spelling
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    aliases: AliasTable,
    targets: HashSet<String>,
    prefixes: HashSet<String>,
    suffixes: HashSet<String>,
    strip_years: bool,
}

impl Canonicalizer {
    pub fn new(config: &CanonicalizerConfig) -> Self {
        let aliases = config.aliases.collapsed();
        Self {
            targets: aliases.targets(),
            aliases,
            prefixes: config.prefixes.iter().map(|p| p.trim().to_string()).collect(),
            suffixes: config.suffixes.iter().map(|s| s.trim().to_string()).collect(),
            strip_years: config.strip_years,
        }
    }

    /// Canonical form of `raw`; empty input gives an empty string.
    ///
    /// Idempotent: alias targets are returned unchanged and stripping runs to
    /// a fixpoint, never removing the last token.
    pub fn canonicalize(&self, raw: &str) -> String {
        let cleaned = collapse(raw);
        if cleaned.is_empty() {
            return String::new();
        }
        if self.targets.contains(&cleaned) {
            return cleaned;
        }
        if let Some(canonical) = self.aliases.get(&cleaned) {
            return canonical.to_string();
        }

        let stripped = self.strip_affixes(&cleaned);
        if self.targets.contains(&stripped) {
            return stripped;
        }
        match self.aliases.get(&stripped) {
            Some(canonical) => canonical.to_string(),
            None => stripped,
        }
    }

    fn strip_affixes(&self, name: &str) -> String {
        let mut tokens: Vec<&str> = name.split_whitespace().collect();

        loop {
            if tokens.len() > 1 && self.prefixes.contains(tokens[0]) {
                tokens.remove(0);
                continue;
            }
            if tokens.len() > 1 {
                let last = tokens[tokens.len() - 1];
                if self.suffixes.contains(last) || (self.strip_years && is_year(last)) {
                    tokens.pop();
                    continue;
                }
            }
            break;
        }

        tokens.join(" ")
    }
}

fn is_year(token: &str) -> bool {
    token.len() == 4
        && token.chars().all(|c| c.is_ascii_digit())
        && (token.starts_with("18") || token.starts_with("19") || token.starts_with("20"))
}
