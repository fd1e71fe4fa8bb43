//! Outcome of a `download_all` run.

use std::path::PathBuf;

use crate::error::EmojiError;

/// An image that was skipped because it could not be fetched.
#[derive(Debug)]
pub struct FailedDownload {
    /// Emoji name.
    pub name: String,
    /// Image URL that failed.
    pub url: String,
    /// Why it failed.
    pub error: EmojiError,
}

/// Aggregate result of downloading every entry of an emoji list.
#[derive(Debug, Default)]
pub struct DownloadSummary {
    /// Files written, in processing order.
    pub downloaded: Vec<PathBuf>,
    /// Number of alias entries that were skipped.
    pub aliases_skipped: usize,
    /// Images that could not be fetched.
    pub failed: Vec<FailedDownload>,
}

impl DownloadSummary {
    /// Number of files written.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.downloaded.len()
    }

    /// Number of images that failed.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Number of non-alias entries that were attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.completed() + self.failed_count()
    }

    /// True when no image failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
