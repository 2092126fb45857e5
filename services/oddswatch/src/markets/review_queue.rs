//! Manual review queue for doubtful moneyline selections

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use crate::markets::confidence::ConfidenceLevel;
use crate::markets::types::{MatchOddsRecord, MoneylineOdds, SelectionTier};

/// Review queue item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub site: String,
    pub event_id: String,
    pub home_team: String,
    pub away_team: String,
    pub moneyline: Option<MoneylineOdds>,
    pub confidence: f64,
    pub tier: SelectionTier,
    pub level: String,
    pub snapshot_hash: Option<String>,
    pub parse_notes: Vec<String>,
    pub status: ReviewStatus,
    pub created_at: i64,
}

/// Review status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Corrected,
}

/// Review item for a record, if its moneyline needs a second look
pub fn create_review_item(record: &MatchOddsRecord) -> Option<ReviewItem> {
    let confidence = record.moneyline_confidence?;
    if !record.needs_review() {
        return None;
    }

    Some(ReviewItem {
        site: record.site.clone(),
        event_id: record.event_id.clone(),
        home_team: record.home_team.clone(),
        away_team: record.away_team.clone(),
        moneyline: record.moneyline,
        confidence: confidence.score,
        tier: confidence.tier,
        level: ConfidenceLevel::of(&confidence).as_str().to_string(),
        snapshot_hash: record.snapshot_hash.clone(),
        parse_notes: record.parse_notes.clone(),
        status: ReviewStatus::Pending,
        created_at: chrono::Utc::now().timestamp_millis(),
    })
}

pub fn collect_review_items(records: &[MatchOddsRecord]) -> Vec<ReviewItem> {
    records.iter().filter_map(create_review_item).collect()
}

fn queue_path(data_dir: &Path, site: &str, date: &str) -> PathBuf {
    data_dir
        .join("review_queue")
        .join(format!("site={}", site))
        .join(format!("date={}", date))
        .join("queue.jsonl")
}

/// Write review queue to JSONL file, replacing the partition
pub fn write_review_queue(data_dir: &Path, site: &str, date: &str, items: &[ReviewItem]) -> Result<PathBuf> {
    let path = queue_path(data_dir, site, date);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let mut file = std::fs::File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    for item in items {
        let json = serde_json::to_string(item)?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} review items to {:?}", items.len(), path);
    Ok(path)
}

/// Load review queue from JSONL file
pub fn load_review_queue(data_dir: &Path, site: &str, date: &str) -> Result<Vec<ReviewItem>> {
    let path = queue_path(data_dir, site, date);
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let mut items = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item: ReviewItem = serde_json::from_str(line)
            .with_context(|| format!("Bad review item at {:?}:{}", path, lineno + 1))?;
        items.push(item);
    }

    Ok(items)
}

/// Summary statistics for review queue
#[derive(Debug, Clone, Default)]
pub struct ReviewStats {
    pub total: usize,
    pub pending: usize,
    pub fallback: usize,
    pub avg_confidence: f64,
}

impl ReviewStats {
    pub fn from_items(items: &[ReviewItem]) -> Self {
        let total = items.len();
        if total == 0 {
            return Self::default();
        }

        Self {
            total,
            pending: items.iter().filter(|i| i.status == ReviewStatus::Pending).count(),
            fallback: items.iter().filter(|i| i.tier == SelectionTier::Fallback).count(),
            avg_confidence: items.iter().map(|i| i.confidence).sum::<f64>() / total as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markets::odds_value::OddsValue;
    use crate::markets::types::MoneylineConfidence;
    use tempfile::TempDir;

    fn record(event_id: &str, score: f64, tier: SelectionTier) -> MatchOddsRecord {
        let odds = |v: f64| OddsValue::new(v).unwrap();
        MatchOddsRecord::new("tipp3", event_id, 0)
            .with_teams("SK Sturm Graz", "LASK", "Sturm Graz".into(), "LASK".into())
            .with_moneyline(
                MoneylineOdds { home: odds(2.0), draw: odds(3.4), away: odds(3.5) },
                MoneylineConfidence { score, tier, position: 0 },
            )
    }

    #[test]
    fn test_only_doubtful_records_are_queued() {
        let records = vec![
            record("1", 9.0, SelectionTier::Scored),
            record("2", 4.5, SelectionTier::Scored),
            record("3", 0.0, SelectionTier::Fallback),
            MatchOddsRecord::new("tipp3", "4", 0),
        ];

        let items = collect_review_items(&records);
        let ids: Vec<&str> = items.iter().map(|i| i.event_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(items[1].level, "very_low");
        assert_eq!(items[0].status, ReviewStatus::Pending);
    }

    #[test]
    fn test_write_and_load_queue() {
        let tmp = TempDir::new().unwrap();
        let items = collect_review_items(&[record("7", 0.0, SelectionTier::Fallback)]);

        let path = write_review_queue(tmp.path(), "tipp3", "2024-03-02", &items).unwrap();
        assert!(path.ends_with("review_queue/site=tipp3/date=2024-03-02/queue.jsonl"));

        let loaded = load_review_queue(tmp.path(), "tipp3", "2024-03-02").unwrap();
        assert_eq!(loaded, items);
        assert!(load_review_queue(tmp.path(), "tipp3", "2024-03-03").unwrap().is_empty());
    }

    #[test]
    fn test_review_stats() {
        let items = collect_review_items(&[
            record("1", 4.0, SelectionTier::Scored),
            record("2", 0.0, SelectionTier::Fallback),
        ]);

        let stats = ReviewStats::from_items(&items);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.fallback, 1);
        assert_eq!(stats.avg_confidence, 2.0);
    }
}
