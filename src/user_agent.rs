//! User-Agent string sent with every request.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/keitaro1020/slack-emojis";

/// Default User-Agent identifying the tool and its version.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("slack-emojis/{version} (+{PROJECT_UA_URL})")
}
