//! Slack Emojis Core Library
//!
//! Downloads every custom emoji of a Slack workspace: the `emoji.list`
//! endpoint is queried once and each image it references is written to an
//! output directory as `<name><extension>`.
//!
//! # Architecture
//!
//! - [`output_dir`] - Output directory preparation
//! - [`emoji`] - The `emoji.list` payload and alias rules
//! - [`download`] - HTTP client for the list call and image downloads
//! - [`pipeline`] - The sequential run tying the stages together
//! - [`error`] - Error type shared by every stage

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod emoji;
pub mod error;
pub mod output_dir;
pub mod pipeline;
#[cfg(test)]
pub mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use download::{
    DEFAULT_API_URL, DOWNLOAD_DELAY, DownloadSummary, FailedDownload, SlackEmojisClient,
    output_filename,
};
pub use emoji::{ALIAS_PREFIX, EmojiList, is_alias};
pub use error::{EmojiError, ErrorKind};
pub use output_dir::ensure_output_dir;
pub use pipeline::{RunConfig, run};
