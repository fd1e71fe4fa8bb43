//! HTTP client for the emoji list endpoint and the emoji images it references.
//!
//! [`SlackEmojisClient`] is built once per run and reused for the list call
//! and every image download, so connections to the image host are pooled.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_API_URL, DOWNLOAD_DELAY, LIST_CONTENT_TYPE, READ_TIMEOUT_SECS,
};
use super::filename::output_filename;
use super::summary::{DownloadSummary, FailedDownload};
use crate::emoji::{EmojiList, is_alias};
use crate::error::{EmojiError, ErrorKind};
use crate::user_agent;

/// Client for listing and downloading a workspace's custom emoji.
///
/// # Example
///
/// ```no_run
/// use slack_emojis_core::SlackEmojisClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = SlackEmojisClient::new();
/// let list = client.fetch_emoji_list("xoxp-token").await?;
/// let summary = client
///     .download_all(&list, Path::new("./emojis"), &mut std::io::stdout())
///     .await?;
/// println!("downloaded {} files", summary.completed());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SlackEmojisClient {
    client: Client,
    api_url: String,
    download_delay: Duration,
}

impl Default for SlackEmojisClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SlackEmojisClient {
    /// Creates a client for the public Slack endpoint with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = build_client(connect_timeout_secs, read_timeout_secs)
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            download_delay: DOWNLOAD_DELAY,
        }
    }

    /// Points the client at a different `emoji.list` endpoint.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Overrides the pause between image downloads.
    #[must_use]
    pub fn with_download_delay(mut self, delay: Duration) -> Self {
        self.download_delay = delay;
        self
    }

    /// The endpoint used by [`fetch_emoji_list`](Self::fetch_emoji_list).
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetches and decodes the emoji list with a single GET request.
    ///
    /// The returned list is not checked for `ok`: a payload that decodes is
    /// returned as-is and the caller decides what `ok: false` means.
    ///
    /// # Errors
    ///
    /// - [`EmojiError::InvalidUrl`] if the configured endpoint is not a URL
    /// - [`EmojiError::Network`] / [`EmojiError::Timeout`] on transport failure
    /// - [`EmojiError::Decode`] if the body is not an emoji list
    #[instrument(skip_all, fields(api_url = %self.api_url))]
    pub async fn fetch_emoji_list(&self, token: &str) -> Result<EmojiList, EmojiError> {
        let mut url =
            Url::parse(&self.api_url).map_err(|_| EmojiError::invalid_url(&self.api_url))?;
        url.query_pairs_mut().append_pair("token", token);

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, LIST_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| EmojiError::network(&self.api_url, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EmojiError::network(&self.api_url, e))?;
        debug!(status = status.as_u16(), bytes = body.len(), "emoji list received");

        let list: EmojiList = serde_json::from_slice(&body).map_err(|e| {
            if !status.is_success() {
                warn!(status = status.as_u16(), "emoji list request returned an error status");
            }
            EmojiError::decode(&self.api_url, e)
        })?;

        debug!(
            ok = list.ok,
            entries = list.emoji.len(),
            cache_ts = %list.cache_ts,
            "decoded emoji list"
        );
        Ok(list)
    }

    /// Downloads every non-alias emoji of `list` into `output_dir`.
    ///
    /// Each written file is reported to `progress` as `download: <filename>`.
    /// Downloads run one after another with the configured pause between
    /// them. An image that cannot be fetched is recorded in the summary and
    /// skipped; the remaining entries are still processed.
    ///
    /// # Errors
    ///
    /// - [`EmojiError::RemoteApi`] if `list.ok` is false (nothing is requested
    ///   or written)
    /// - [`EmojiError::Io`] if an output file cannot be created or written
    /// - [`EmojiError::ProgressSink`] if a progress line cannot be written
    #[instrument(skip_all, fields(output_dir = %output_dir.display(), entries = list.emoji.len()))]
    pub async fn download_all<W>(
        &self,
        list: &EmojiList,
        output_dir: &Path,
        progress: &mut W,
    ) -> Result<DownloadSummary, EmojiError>
    where
        W: Write + ?Sized,
    {
        if !list.ok {
            return Err(EmojiError::remote_api(list.error.clone()));
        }

        let mut summary = DownloadSummary::default();
        let mut filenames = HashSet::new();
        for (name, value) in list.entries() {
            if is_alias(value) {
                debug!(emoji = name, target = value, "skipping alias");
                summary.aliases_skipped += 1;
                continue;
            }

            if summary.attempted() > 0 {
                tokio::time::sleep(self.download_delay).await;
            }

            let filename = output_filename(name, value);
            if !filenames.insert(filename.clone()) {
                warn!(
                    emoji = name,
                    filename = %filename,
                    "filename already used by another emoji, overwriting"
                );
            }
            let file_path = output_dir.join(&filename);
            match self.download_emoji(value, &file_path).await {
                Ok(()) => {
                    writeln!(progress, "download: {filename}")
                        .and_then(|()| progress.flush())
                        .map_err(EmojiError::progress_sink)?;
                    summary.downloaded.push(file_path);
                }
                Err(error) if error.kind() == ErrorKind::NetworkFailure => {
                    warn!(
                        emoji = name,
                        url = value,
                        kind = error.kind().as_str(),
                        error = %error,
                        "skipping emoji"
                    );
                    summary.failed.push(FailedDownload {
                        name: name.to_string(),
                        url: value.to_string(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        info!(
            downloaded = summary.completed(),
            failed = summary.failed_count(),
            aliases = summary.aliases_skipped,
            "emoji download finished"
        );
        Ok(summary)
    }

    /// Fetches one image and writes it to `file_path`.
    ///
    /// The response and the file handle are both released before returning.
    /// A partially written file is removed when the body cannot be read.
    async fn download_emoji(&self, url: &str, file_path: &Path) -> Result<(), EmojiError> {
        let parsed = Url::parse(url).map_err(|_| EmojiError::invalid_url(url))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| EmojiError::network(url, e))?;
        if !response.status().is_success() {
            return Err(EmojiError::http_status(url, response.status().as_u16()));
        }

        let mut file = File::create(file_path)
            .await
            .map_err(|e| EmojiError::io(file_path, e))?;
        let stream_result = stream_to_file(&mut file, response, url, file_path).await;
        drop(file);

        match stream_result {
            Ok(bytes) => {
                debug!(path = %file_path.display(), bytes, "emoji written");
                Ok(())
            }
            Err(error) => {
                remove_partial_file(file_path).await;
                Err(error)
            }
        }
    }
}

/// Deletes a file left behind by a failed download. A failure to delete is
/// logged, since the truncated file stays on disk.
async fn remove_partial_file(file_path: &Path) -> bool {
    match tokio::fs::remove_file(file_path).await {
        Ok(()) => {
            debug!(path = %file_path.display(), "removed partial file");
            true
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => false,
        Err(error) => {
            warn!(
                path = %file_path.display(),
                error = %error,
                "could not remove partial file"
            );
            false
        }
    }
}

/// Streams the response body into `file`, returning the bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, EmojiError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| EmojiError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| EmojiError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| EmojiError::io(file_path, e))?;

    Ok(bytes_written)
}

fn build_client(connect_timeout_secs: u64, read_timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .timeout(Duration::from_secs(read_timeout_secs))
        .gzip(true)
        .user_agent(user_agent::default_user_agent())
        .build()
}
