//! Per-batch download results.

use std::path::{Path, PathBuf};

use crate::error::DownloadError;

/// What happened to one href.
#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded { path: PathBuf, bytes: u64 },
    /// The destination already existed; no request was made.
    Skipped { path: PathBuf },
    Failed(DownloadError),
}

/// Outcome for one href of the batch.
#[derive(Debug)]
pub struct ItemReport {
    pub href: String,
    pub outcome: DownloadOutcome,
}

/// Results of one `download_all` batch, in input order.
#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Directory files were written to.
    pub directory: PathBuf,
    pub items: Vec<ItemReport>,

    // Statistics
    pub downloaded_count: u64,
    pub skipped_count: u64,
    pub failed_count: u64,
    pub bytes_downloaded: u64,
}

impl DownloadReport {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory,
            ..Default::default()
        }
    }

    /// Append an item and update the counters.
    pub fn record(&mut self, href: String, outcome: DownloadOutcome) {
        match &outcome {
            DownloadOutcome::Downloaded { bytes, .. } => {
                self.downloaded_count += 1;
                self.bytes_downloaded += bytes;
            }
            DownloadOutcome::Skipped { .. } => self.skipped_count += 1,
            DownloadOutcome::Failed(_) => self.failed_count += 1,
        }
        self.items.push(ItemReport { href, outcome });
    }

    /// Total hrefs processed.
    pub fn total(&self) -> u64 {
        self.downloaded_count + self.skipped_count + self.failed_count
    }

    /// Paths written by this batch.
    pub fn downloaded_paths(&self) -> Vec<&Path> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                DownloadOutcome::Downloaded { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Paths that were already present.
    pub fn skipped_paths(&self) -> Vec<&Path> {
        self.items
            .iter()
            .filter_map(|item| match &item.outcome {
                DownloadOutcome::Skipped { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Failed hrefs with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &DownloadError)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            DownloadOutcome::Failed(e) => Some((item.href.as_str(), e)),
            _ => None,
        })
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count > 0
    }
}
