use serde::Deserialize;
use crate::markets::binary::LabelVocabulary;
use crate::markets::types::MarketKind;
use crate::markup::profile::CompiledProfile;
use crate::teams::canonical::Canonicalizer;

/// Exact heading phrases a site prints above its detail markets
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarketLabels {
    pub btts: String,
    pub totals: String,
    pub correct_score: String,
}

impl Default for MarketLabels {
    fn default() -> Self {
        Self {
            btts: "Fällt für beide Teams mindestens je ein Tor?".to_string(),
            totals: "Wie viele Tore werden erzielt?".to_string(),
            correct_score: "Resultatwette".to_string(),
        }
    }
}

impl MarketLabels {
    /// Heading phrase for a detail market; the moneyline has none
    pub fn phrase(&self, kind: MarketKind) -> Option<&str> {
        let phrase = match kind {
            MarketKind::Moneyline => return None,
            MarketKind::Btts => &self.btts,
            MarketKind::Totals => &self.totals,
            MarketKind::CorrectScore => &self.correct_score,
        };
        if phrase.trim().is_empty() {
            None
        } else {
            Some(phrase)
        }
    }
}

/// Everything site-specific the extraction core needs
pub trait SiteAdapter {
    fn name(&self) -> &str;

    fn market_labels(&self) -> &MarketLabels;

    fn vocabulary(&self) -> &LabelVocabulary;

    fn canonicalizer(&self) -> &Canonicalizer;

    fn markup(&self) -> &CompiledProfile;

    fn market_phrase(&self, kind: MarketKind) -> Option<&str> {
        self.market_labels().phrase(kind)
    }
}
