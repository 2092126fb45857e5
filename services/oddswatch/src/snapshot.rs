//! Captured page snapshots on disk
//!
//! A snapshot directory holds one or more `overview*.html` league pages and
//! optional `event_<id>.html` detail pages. Every page is fingerprinted so a
//! record can be traced back to the exact markup it came from.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use crate::markets::assemble::assemble_record;
use crate::markets::confidence::MoneylineHeuristics;
use crate::markets::types::MatchOddsRecord;
use crate::markup::locator::MarketDocument;
use crate::markup::overview::{parse_overview, OverviewRow};
use crate::site::traits::SiteAdapter;

/// One captured HTML file
#[derive(Debug, Clone)]
pub struct SnapshotPage {
    pub path: PathBuf,
    pub html: String,
    pub sha256: String,
}

impl SnapshotPage {
    pub fn read(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path).with_context(|| format!("Failed to read snapshot page {:?}", path))?;
        Ok(Self {
            path: path.to_path_buf(),
            sha256: fingerprint(&html),
            html,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub overviews: Vec<SnapshotPage>,
    /// Detail pages by event id
    pub details: BTreeMap<String, SnapshotPage>,
}

/// SHA-256 of page content, lowercase hex
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Event id from a detail page file name such as `event_4711.html`
pub fn detail_event_id(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix("event_")
        .and_then(|rest| rest.strip_suffix(".html"))
        .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()))
}

fn is_overview(file_name: &str) -> bool {
    file_name.starts_with("overview") && file_name.ends_with(".html")
}

/// Walk `dir` and load every overview and detail page in it
pub fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    if !dir.is_dir() {
        anyhow::bail!("Snapshot directory {:?} does not exist", dir);
    }

    let mut snapshot = Snapshot::default();

    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {:?}", dir))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };

        if is_overview(name) {
            snapshot.overviews.push(SnapshotPage::read(entry.path())?);
        } else if let Some(event_id) = detail_event_id(name) {
            if snapshot.details.contains_key(event_id) {
                tracing::warn!("Duplicate detail page for event {} at {:?}, keeping first", event_id, entry.path());
                continue;
            }
            snapshot.details.insert(event_id.to_string(), SnapshotPage::read(entry.path())?);
        } else {
            tracing::debug!("Ignoring {:?}", entry.path());
        }
    }

    tracing::info!(
        "Loaded snapshot {:?}: {} overview pages, {} detail pages",
        dir,
        snapshot.overviews.len(),
        snapshot.details.len()
    );
    Ok(snapshot)
}

impl Snapshot {
    /// Overview rows across all overview pages, first occurrence of each event wins
    pub fn rows<S: SiteAdapter + ?Sized>(&self, site: &S) -> Vec<(OverviewRow, &SnapshotPage)> {
        let mut seen = std::collections::HashSet::new();
        let mut rows = Vec::new();

        for page in &self.overviews {
            let doc = MarketDocument::parse(&page.html);
            for row in parse_overview(&doc, site.markup()) {
                if seen.insert(row.event_id.clone()) {
                    rows.push((row, page));
                } else {
                    tracing::warn!("Event {} listed again in {:?}, skipping", row.event_id, page.path);
                }
            }
        }

        rows
    }

    /// Run extraction over every event in the snapshot
    pub fn extract<S: SiteAdapter + ?Sized>(
        &self,
        site: &S,
        heuristics: &MoneylineHeuristics,
        scraped_at: i64,
        progress: Option<&ProgressBar>,
    ) -> Vec<MatchOddsRecord> {
        let rows = self.rows(site);
        if let Some(pb) = progress {
            pb.set_length(rows.len() as u64);
        }

        let mut records = Vec::with_capacity(rows.len());
        for (row, overview) in rows {
            let detail_page = self.details.get(&row.event_id);
            let detail_doc = detail_page.map(|p| MarketDocument::parse(&p.html));

            let hash = match detail_page {
                Some(detail) => fingerprint(&format!("{}:{}", overview.sha256, detail.sha256)),
                None => overview.sha256.clone(),
            };

            let record = assemble_record(site, &row, detail_doc.as_ref(), heuristics, scraped_at)
                .with_snapshot_hash(Some(hash));
            records.push(record);

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        tracing::info!("Extracted {} records for site {}", records.len(), site.name());
        records
    }
}
