use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use crate::markets::confidence::MoneylineHeuristics;
use crate::site::configured::{ConfiguredSite, SiteConfig, PRESET_SITES};
use crate::teams::canonical::{Canonicalizer, CanonicalizerConfig};
use crate::teams::matcher::DEFAULT_MATCH_THRESHOLD;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub moneyline: MoneylineHeuristics,
    #[serde(default)]
    pub sites: BTreeMap<String, SiteConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Canonicalizer applied to both sides before scoring
    #[serde(default)]
    pub teams: CanonicalizerConfig,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            teams: CanonicalizerConfig::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            matching: MatchingConfig::default(),
            moneyline: MoneylineHeuristics::default(),
            sites: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config from {:?}", path.as_ref()))?;
        let config: Config = toml::from_str(&content)
            .context("Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load `path` if given, otherwise built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Configured site table, else the built-in preset of that name
    pub fn site_config(&self, name: &str) -> Option<SiteConfig> {
        self.sites.get(name).cloned().or_else(|| SiteConfig::preset(name))
    }

    pub fn site(&self, name: &str) -> Result<ConfiguredSite> {
        let config = self.site_config(name).ok_or_else(|| {
            anyhow!(
                "Unknown site {:?}; configure [sites.{}] or use one of {:?}",
                name,
                name,
                PRESET_SITES
            )
        })?;
        ConfiguredSite::new(name, &config).with_context(|| format!("Invalid markup profile for site {}", name))
    }

    pub fn match_canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new(&self.matching.teams)
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_threshold() -> u8 {
    DEFAULT_MATCH_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::traits::SiteAdapter;

    #[test]
    fn test_config_load() {
        let config = Config::load("../../config/oddswatch.toml").unwrap();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.matching.threshold, 80);
        assert!(config.sites.contains_key("tipp3"));

        let site = config.site("tipp3").unwrap();
        assert_eq!(site.canonicalizer().canonicalize("FK Austria Wien"), "Austria Wien");
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.matching.threshold, 80);
        assert_eq!(config.moneyline, MoneylineHeuristics::default());
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_sites_fall_back_to_presets() {
        let config = Config::default();
        assert!(config.site("lottoland").is_ok());
        assert!(config.site("nowhere").is_err());
    }

    #[test]
    fn test_configured_site_overrides_preset() {
        let config: Config = toml::from_str(
            r#"
[matching]
threshold = 90

[sites.tipp3.market_labels]
correct_score = "Exaktes Ergebnis"
"#,
        )
        .unwrap();

        assert_eq!(config.matching.threshold, 90);
        let site = config.site("tipp3").unwrap();
        assert_eq!(site.market_labels().correct_score, "Exaktes Ergebnis");
        // a configured table replaces the preset, aliases included
        assert_eq!(site.canonicalizer().canonicalize("RB Salzburg"), "RB Salzburg");
    }

    #[test]
    fn test_missing_file() {
        assert!(Config::load("does/not/exist.toml").is_err());
        assert!(Config::load_or_default(None).is_ok());
    }
}
