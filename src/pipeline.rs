//! The end-to-end run: prepare the directory, fetch the list, download.

use std::fmt;
use std::io::Write;
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::download::{DownloadSummary, SlackEmojisClient};
use crate::error::EmojiError;
use crate::output_dir::ensure_output_dir;

/// Settings for one run, resolved from flags, environment and config file.
#[derive(Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Slack API token.
    pub token: String,
    /// Directory the emoji images are written to.
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Creates a run configuration.
    pub fn new(token: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            token: token.into(),
            output_dir: output_dir.into(),
        }
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("token", &"<redacted>")
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

/// Runs the whole workflow with `client`, writing progress lines to `progress`.
///
/// # Errors
///
/// Returns the first [`EmojiError`] from directory preparation, the list
/// request, or a hard failure while downloading. Images that fail to
/// download are reported in the returned [`DownloadSummary`] instead.
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub async fn run<W>(
    config: &RunConfig,
    client: &SlackEmojisClient,
    progress: &mut W,
) -> Result<DownloadSummary, EmojiError>
where
    W: Write + ?Sized,
{
    ensure_output_dir(&config.output_dir)?;

    let list = client.fetch_emoji_list(&config.token).await?;
    if list.ok {
        info!(
            entries = list.emoji.len(),
            aliases = list.alias_count(),
            "emoji list fetched"
        );
    }

    client
        .download_all(&list, &config.output_dir, progress)
        .await
}
