//! Event rows from a league overview page

use serde::{Deserialize, Serialize};
use crate::markup::locator::{element_text, MarketDocument};
use crate::markup::profile::CompiledProfile;

/// One fixture as listed on an overview page, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewRow {
    pub event_id: String,
    pub home_raw: String,
    pub away_raw: String,
    /// Button texts in page order
    pub odds_labels: Vec<String>,
}

/// Read all event rows from an overview page
pub fn parse_overview(doc: &MarketDocument, profile: &CompiledProfile) -> Vec<OverviewRow> {
    let mut rows = Vec::new();

    for row in doc.html().select(&profile.event_row) {
        let Some(event_id) = row
            .value()
            .id()
            .and_then(|id| id.strip_prefix(profile.event_id_prefix.as_str()))
            .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
        else {
            continue;
        };

        let teams: Vec<String> = row
            .select(&profile.team_link)
            .map(|link| first_line(&link.text().collect::<String>()))
            .collect();

        if teams.len() != 2 {
            tracing::warn!("Event {} has {} team links, expected 2", event_id, teams.len());
            continue;
        }
        if teams.iter().any(|t| t.is_empty()) {
            tracing::warn!("Event {} has an empty team name: {:?}", event_id, teams);
            continue;
        }

        let odds_labels = row.select(&profile.overview_odds).map(element_text).collect();

        rows.push(OverviewRow {
            event_id: event_id.to_string(),
            home_raw: teams[0].clone(),
            away_raw: teams[1].clone(),
            odds_labels,
        });
    }

    tracing::info!("Parsed {} event rows from overview", rows.len());
    rows
}

/// Team links carry extra lines (form, kickoff) after the name
fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string()
}
