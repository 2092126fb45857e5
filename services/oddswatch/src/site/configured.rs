//! Site adapter built from configuration or a built-in preset

use serde::Deserialize;
use crate::markets::binary::LabelVocabulary;
use crate::markup::profile::{CompiledProfile, MarkupError, MarkupProfile};
use crate::site::traits::{MarketLabels, SiteAdapter};
use crate::teams::canonical::{AliasTable, Canonicalizer, CanonicalizerConfig};

/// Names accepted by [`SiteConfig::preset`]
pub const PRESET_SITES: [&str; 3] = ["tipp3", "win2day", "lottoland"];

const AUSTRIAN_ALIASES: [(&str, &str); 9] = [
    ("FK Austria Wien", "Austria Wien"),
    ("FK Austria Vienna", "Austria Wien"),
    ("Austria W.", "Austria Wien"),
    ("SK Rapid Wien", "Rapid Wien"),
    ("Rapid Vienna", "Rapid Wien"),
    ("Rapid W.", "Rapid Wien"),
    ("RB Salzburg", "Red Bull Salzburg"),
    ("FC Red Bull Salzburg", "Red Bull Salzburg"),
    ("Salzburg", "Red Bull Salzburg"),
];

const GERMAN_ALIASES: [(&str, &str); 4] = [
    ("Bayern München", "Bayern Munich"),
    ("FC Bayern München", "Bayern Munich"),
    ("Borussia Dortmund", "BVB Dortmund"),
    ("BV Borussia Dortmund", "BVB Dortmund"),
];

/// One `[sites.<name>]` table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub market_labels: MarketLabels,
    pub vocabulary: LabelVocabulary,
    pub teams: CanonicalizerConfig,
    pub markup: MarkupProfile,
}

impl SiteConfig {
    pub fn preset(name: &str) -> Option<Self> {
        let aliases: Vec<(&str, &str)> = match name {
            "tipp3" | "win2day" => AUSTRIAN_ALIASES.to_vec(),
            "lottoland" => AUSTRIAN_ALIASES.iter().chain(GERMAN_ALIASES.iter()).copied().collect(),
            _ => return None,
        };

        Some(Self {
            teams: CanonicalizerConfig {
                aliases: AliasTable::from_pairs(&aliases),
                ..Default::default()
            },
            ..Default::default()
        })
    }
}

/// Adapter backed by a [`SiteConfig`]
#[derive(Debug, Clone)]
pub struct ConfiguredSite {
    name: String,
    labels: MarketLabels,
    vocabulary: LabelVocabulary,
    canonicalizer: Canonicalizer,
    markup: CompiledProfile,
}

impl ConfiguredSite {
    pub fn new(name: &str, config: &SiteConfig) -> Result<Self, MarkupError> {
        Ok(Self {
            name: name.to_string(),
            labels: config.market_labels.clone(),
            vocabulary: config.vocabulary.clone(),
            canonicalizer: Canonicalizer::new(&config.teams),
            markup: config.markup.compile()?,
        })
    }
}

impl SiteAdapter for ConfiguredSite {
    fn name(&self) -> &str {
        &self.name
    }

    fn market_labels(&self) -> &MarketLabels {
        &self.labels
    }

    fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }

    fn canonicalizer(&self) -> &Canonicalizer {
        &self.canonicalizer
    }

    fn markup(&self) -> &CompiledProfile {
        &self.markup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::types::MarketKind;

    #[test]
    fn test_presets() {
        for name in PRESET_SITES {
            let config = SiteConfig::preset(name).unwrap();
            let site = ConfiguredSite::new(name, &config).unwrap();
            assert_eq!(site.name(), name);
            assert_eq!(site.canonicalizer().canonicalize("SK Rapid Wien"), "Rapid Wien");
        }
        assert!(SiteConfig::preset("bet365").is_none());
    }

    #[test]
    fn test_lottoland_has_german_aliases() {
        let lottoland = ConfiguredSite::new("lottoland", &SiteConfig::preset("lottoland").unwrap()).unwrap();
        let win2day = ConfiguredSite::new("win2day", &SiteConfig::preset("win2day").unwrap()).unwrap();

        assert_eq!(lottoland.canonicalizer().canonicalize("FC Bayern München"), "Bayern Munich");
        assert_eq!(win2day.canonicalizer().canonicalize("FC Bayern München"), "Bayern München");
    }

    #[test]
    fn test_market_phrases() {
        let site = ConfiguredSite::new("tipp3", &SiteConfig::preset("tipp3").unwrap()).unwrap();
        assert_eq!(site.market_phrase(MarketKind::CorrectScore), Some("Resultatwette"));
        assert_eq!(site.market_phrase(MarketKind::Moneyline), None);
    }

    #[test]
    fn test_site_config_from_toml() {
        let config: SiteConfig = toml::from_str(
            r#"
[market_labels]
btts = "Both teams to score"
correct_score = ""

[vocabulary]
yes = ["yes"]
positional_totals = false

[teams.aliases]
"Sturm" = "Sturm Graz"

[markup]
heading = "h3.market-title"
"#,
        )
        .unwrap();
        let site = ConfiguredSite::new("custom", &config).unwrap();

        assert_eq!(site.market_phrase(MarketKind::Btts), Some("Both teams to score"));
        assert_eq!(site.market_phrase(MarketKind::Totals), Some("Wie viele Tore werden erzielt?"));
        assert_eq!(site.market_phrase(MarketKind::CorrectScore), None);
        assert!(!site.vocabulary().positional_totals);
        assert_eq!(site.canonicalizer().canonicalize("Sturm"), "Sturm Graz");
    }

    #[test]
    fn test_bad_selector_is_reported() {
        let config = SiteConfig {
            markup: MarkupProfile {
                heading: "div[[".to_string(),
                ..MarkupProfile::tipp3()
            },
            ..Default::default()
        };
        assert!(ConfiguredSite::new("broken", &config).is_err());
    }
}
