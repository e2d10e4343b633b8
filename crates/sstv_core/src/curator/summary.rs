//! Per-run bookkeeping.

use std::path::PathBuf;

use crate::classify::ImageScore;
use crate::models::Classification;

/// What happened to a classified file.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    /// Content; left in place.
    Retained,
    /// Static; removed from disk.
    Deleted,
    /// Static, but removal failed. The file is still on disk.
    DeleteFailed(String),
}

/// Result of curating one downloaded image.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedImage {
    pub path: PathBuf,
    pub score: ImageScore,
    pub classification: Classification,
    pub disposition: Disposition,
}

/// Outcome for one payload reference.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadOutcome {
    Curated(CuratedImage),
    DownloadFailed(String),
}

/// One payload, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadRecord {
    pub observation_id: u64,
    pub url: String,
    pub outcome: PayloadOutcome,
}

/// Totals for a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    /// Observations returned by the API.
    pub observations: usize,
    /// Every payload visited, in order.
    pub records: Vec<PayloadRecord>,
}

impl RunSummary {
    /// Record a payload outcome.
    pub fn push(&mut self, record: PayloadRecord) {
        self.records.push(record);
    }

    /// Payload references seen.
    pub fn payloads(&self) -> usize {
        self.records.len()
    }

    /// Successful downloads; each one was classified exactly once.
    pub fn downloaded(&self) -> usize {
        self.curated().count()
    }

    pub fn download_failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, PayloadOutcome::DownloadFailed(_)))
            .count()
    }

    pub fn retained(&self) -> usize {
        self.curated()
            .filter(|c| c.disposition == Disposition::Retained)
            .count()
    }

    pub fn deleted(&self) -> usize {
        self.curated()
            .filter(|c| c.disposition == Disposition::Deleted)
            .count()
    }

    pub fn delete_failures(&self) -> usize {
        self.curated()
            .filter(|c| matches!(c.disposition, Disposition::DeleteFailed(_)))
            .count()
    }

    /// Paths of images kept as content.
    pub fn retained_paths(&self) -> Vec<&PathBuf> {
        self.curated()
            .filter(|c| c.disposition == Disposition::Retained)
            .map(|c| &c.path)
            .collect()
    }

    fn curated(&self) -> impl Iterator<Item = &CuratedImage> {
        self.records.iter().filter_map(|r| match &r.outcome {
            PayloadOutcome::Curated(c) => Some(c),
            PayloadOutcome::DownloadFailed(_) => None,
        })
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} observations, {} payloads: {} kept, {} deleted, {} download failures",
            self.observations,
            self.payloads(),
            self.retained(),
            self.deleted(),
            self.download_failures()
        )?;
        if self.delete_failures() > 0 {
            write!(f, ", {} could not be deleted", self.delete_failures())?;
        }
        Ok(())
    }
}
