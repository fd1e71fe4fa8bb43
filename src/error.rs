//! Error types shared by the directory, fetch and download stages.
//!
//! Every variant carries the url or path it failed on. [`EmojiError::kind`]
//! collapses the variants onto the coarse [`ErrorKind`] taxonomy used for
//! reporting and for the per-image skip decision.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of an [`EmojiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The output path exists but is not a directory.
    InvalidOutputTarget,
    /// Directory or file creation, or a write, failed.
    IoFailure,
    /// The API or an image host could not be reached.
    NetworkFailure,
    /// The emoji list response was not valid JSON.
    DecodeFailure,
    /// The API answered with `ok: false`.
    RemoteApiError,
}

impl ErrorKind {
    /// Returns the stable label used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidOutputTarget => "invalid_output_target",
            Self::IoFailure => "io_failure",
            Self::NetworkFailure => "network_failure",
            Self::DecodeFailure => "decode_failure",
            Self::RemoteApiError => "remote_api_error",
        }
    }
}

/// Errors produced while preparing the output directory, fetching the
/// emoji list or downloading images.
#[derive(Debug, Error)]
pub enum EmojiError {
    /// A regular file (or other non-directory) occupies the output path.
    #[error("output is a file, not a directory: {path}")]
    InvalidOutputTarget {
        /// The offending output path.
        path: PathBuf,
    },

    /// File system error while creating the directory or writing a file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Network-level error (DNS resolution, connection refused, TLS, body read).
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// An image host answered with a non-success status.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The image URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The emoji list body could not be decoded.
    #[error("could not decode emoji list from {url}: {source}")]
    Decode {
        /// The API endpoint.
        url: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The API reported a failure in its payload.
    #[error("emoji list error: {message}")]
    RemoteApi {
        /// The `error` field of the payload.
        message: String,
    },

    /// Writing a progress line failed.
    #[error("failed to write progress line: {source}")]
    ProgressSink {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl EmojiError {
    /// Creates an invalid-output-target error.
    pub fn invalid_output_target(path: impl Into<PathBuf>) -> Self {
        Self::InvalidOutputTarget { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a transport error, promoting timeouts to [`EmojiError::Timeout`].
    ///
    /// The URL is stripped from `source` so the query string (which carries
    /// the token for the list endpoint) never reaches the message.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::Timeout { url: url.into() };
        }
        Self::Network {
            url: url.into(),
            source: source.without_url(),
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates a remote API error from the payload's `error` field.
    pub fn remote_api(message: impl Into<String>) -> Self {
        Self::RemoteApi {
            message: message.into(),
        }
    }

    /// Creates a progress sink error.
    pub fn progress_sink(source: std::io::Error) -> Self {
        Self::ProgressSink { source }
    }

    /// Maps the variant onto its [`ErrorKind`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidOutputTarget { .. } => ErrorKind::InvalidOutputTarget,
            Self::Io { .. } | Self::ProgressSink { .. } => ErrorKind::IoFailure,
            Self::Network { .. }
            | Self::Timeout { .. }
            | Self::HttpStatus { .. }
            | Self::InvalidUrl { .. } => ErrorKind::NetworkFailure,
            Self::Decode { .. } => ErrorKind::DecodeFailure,
            Self::RemoteApi { .. } => ErrorKind::RemoteApiError,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path as context, so callers go through the constructors above.
