//! Batch result tracking.

use std::path::PathBuf;

/// A media item that could not be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDownload {
    pub url: String,
    /// Unknown when the destination itself could not be derived.
    pub destination: Option<PathBuf>,
    pub reason: String,
}

/// Outcome of one download batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub downloaded: Vec<PathBuf>,
    pub failed: Vec<FailedDownload>,
}

impl BatchReport {
    /// Record a written file.
    pub fn record_success(&mut self, path: PathBuf) {
        self.downloaded.push(path);
    }

    /// Record a failed item.
    pub fn record_failure(&mut self, failure: FailedDownload) {
        self.failed.push(failure);
    }

    pub fn downloaded_count(&self) -> usize {
        self.downloaded.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Total items attempted.
    pub fn total(&self) -> usize {
        self.downloaded_count() + self.failed_count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}
