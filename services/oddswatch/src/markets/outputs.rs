//! JSONL output for extracted odds records

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use crate::markets::types::MatchOddsRecord;

pub fn records_path(data_dir: &Path, site: &str, date: &str) -> PathBuf {
    data_dir
        .join("records")
        .join(format!("site={}", site))
        .join(format!("date={}", date))
        .join("records.jsonl")
}

/// Write one pass of records, replacing whatever the partition held
pub fn write_records_jsonl(data_dir: &Path, site: &str, date: &str, records: &[MatchOddsRecord]) -> Result<PathBuf> {
    let path = records_path(data_dir, site, date);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let mut file = std::fs::File::create(&path).with_context(|| format!("Failed to create {:?}", path))?;
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(file, "{}", json)?;
    }

    tracing::info!("Wrote {} records to {:?}", records.len(), path);
    Ok(path)
}

/// Read records from any JSONL file
pub fn load_records(path: &Path) -> Result<Vec<MatchOddsRecord>> {
    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let mut records = Vec::new();

    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: MatchOddsRecord = serde_json::from_str(&line)
            .with_context(|| format!("Bad record at {:?}:{}", path, lineno + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Merge a fresh pass over older records.
///
/// Records are keyed by (site, event_id); a fresh record replaces the old one
/// whole, never field by field. Output is ordered by key.
pub fn supersede(previous: Vec<MatchOddsRecord>, fresh: Vec<MatchOddsRecord>) -> Vec<MatchOddsRecord> {
    let mut merged: BTreeMap<(String, String), MatchOddsRecord> = BTreeMap::new();
    let mut replaced = 0;

    for record in previous {
        merged.insert((record.site.clone(), record.event_id.clone()), record);
    }
    for record in fresh {
        if merged.insert((record.site.clone(), record.event_id.clone()), record).is_some() {
            replaced += 1;
        }
    }

    tracing::debug!("Superseded {} records, {} total", replaced, merged.len());
    merged.into_values().collect()
}
