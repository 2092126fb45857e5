//! CSS selectors describing one site's page markup

use scraper::Selector;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid selector {selector:?} for {field}: {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },
}

/// Selector strings as written in config
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkupProfile {
    /// Elements whose text names a market
    pub heading: String,
    /// A single betting control (label + button)
    pub bet_unit: String,
    pub unit_label: String,
    pub unit_odds: String,
    /// Class marking a layout placeholder unit
    pub spacer_class: String,
    /// Row grouping several bets under a shared caption (goal lines)
    pub row: String,
    pub row_info: String,
    pub row_bet: String,
    /// Overview page: one element per event, id `<event_id_prefix><digits>`
    pub event_row: String,
    pub event_id_prefix: String,
    pub team_link: String,
    pub overview_odds: String,
}

impl Default for MarkupProfile {
    fn default() -> Self {
        Self::tipp3()
    }
}

impl MarkupProfile {
    pub fn tipp3() -> Self {
        Self {
            heading: "div.t3-match-details__entry-header".to_string(),
            bet_unit: "div.t3-bet-element".to_string(),
            unit_label: "div.t3-bet-element__label".to_string(),
            unit_odds: "span.t3-bet-button__text".to_string(),
            spacer_class: "spacer".to_string(),
            row: "div.t3-list-entry".to_string(),
            row_info: "div.t3-list-entry__info-muted".to_string(),
            row_bet: "div.t3-list-entry__bet".to_string(),
            event_row: "div[id^=\"event_\"]".to_string(),
            event_id_prefix: "event_".to_string(),
            team_link: "a.t3-list-entry__player".to_string(),
            overview_odds: "span.t3-bet-button__text".to_string(),
        }
    }

    pub fn compile(&self) -> Result<CompiledProfile, MarkupError> {
        Ok(CompiledProfile {
            heading: compile("heading", &self.heading)?,
            bet_unit: compile("bet_unit", &self.bet_unit)?,
            unit_label: compile("unit_label", &self.unit_label)?,
            unit_odds: compile("unit_odds", &self.unit_odds)?,
            spacer_class: self.spacer_class.clone(),
            row: compile("row", &self.row)?,
            row_info: compile("row_info", &self.row_info)?,
            row_bet: compile("row_bet", &self.row_bet)?,
            event_row: compile("event_row", &self.event_row)?,
            event_id_prefix: self.event_id_prefix.clone(),
            team_link: compile("team_link", &self.team_link)?,
            overview_odds: compile("overview_odds", &self.overview_odds)?,
        })
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, MarkupError> {
    Selector::parse(selector).map_err(|e| MarkupError::InvalidSelector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Parsed selectors, ready to run against a document
#[derive(Debug, Clone)]
pub struct CompiledProfile {
    pub heading: Selector,
    pub bet_unit: Selector,
    pub unit_label: Selector,
    pub unit_odds: Selector,
    pub spacer_class: String,
    pub row: Selector,
    pub row_info: Selector,
    pub row_bet: Selector,
    pub event_row: Selector,
    pub event_id_prefix: String,
    pub team_link: Selector,
    pub overview_odds: Selector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tipp3_profile_compiles() {
        assert!(MarkupProfile::tipp3().compile().is_ok());
    }

    #[test]
    fn test_invalid_selector() {
        let profile = MarkupProfile {
            row: "div[[".to_string(),
            ..MarkupProfile::tipp3()
        };
        let err = profile.compile().unwrap_err();
        assert!(matches!(err, MarkupError::InvalidSelector { field: "row", .. }));
    }
}
