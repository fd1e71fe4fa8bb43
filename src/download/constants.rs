//! Constants for the download module (endpoint, timeouts, pacing).

use std::time::Duration;

/// Slack Web API endpoint returning the workspace's custom emoji.
pub const DEFAULT_API_URL: &str = "https://slack.com/api/emoji.list";

/// Content type sent with the list request, kept for compatibility with the
/// Web API's form-encoded convention.
pub const LIST_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Pause between consecutive image downloads.
pub const DOWNLOAD_DELAY: Duration = Duration::from_secs(1);
