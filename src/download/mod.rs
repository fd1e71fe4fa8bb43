//! Emoji list fetching and image downloading.
//!
//! # Features
//!
//! - One GET against `emoji.list`, token passed as a query parameter
//! - Alias entries (`alias:<name>`) are skipped
//! - Images streamed to `<output_dir>/<name><extension>`, one at a time,
//!   with a fixed pause between requests
//! - Per-image network failures are collected instead of aborting the run
//!
//! # Example
//!
//! ```no_run
//! use slack_emojis_core::download::SlackEmojisClient;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SlackEmojisClient::new();
//! let list = client.fetch_emoji_list("xoxp-token").await?;
//! client
//!     .download_all(&list, Path::new("."), &mut std::io::stdout())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod filename;
mod summary;

pub use client::SlackEmojisClient;
pub use constants::{DEFAULT_API_URL, DOWNLOAD_DELAY};
pub use filename::output_filename;
pub use summary::{DownloadSummary, FailedDownload};
