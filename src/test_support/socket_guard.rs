//! Skips wiremock-backed tests on hosts where localhost cannot be bound.
//!
//! Sandboxed CI runners sometimes forbid listening sockets. Those tests are
//! skipped with a note on stderr unless [`REQUIRE_SOCKET_TESTS_ENV`] asks for
//! a hard failure.

use std::net::TcpListener;

use wiremock::MockServer;

/// Set to `1`, `true` or `yes` to fail instead of skipping.
pub const REQUIRE_SOCKET_TESTS_ENV: &str = "SLACK_EMOJIS_REQUIRE_SOCKET_TESTS";

fn env_flag_enabled(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

/// Starts a mock server, or returns `None` when this host cannot bind one.
///
/// # Panics
///
/// When sockets are unavailable and [`REQUIRE_SOCKET_TESTS_ENV`] is set.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_ok() {
        return Some(MockServer::start().await);
    }

    let required =
        std::env::var(REQUIRE_SOCKET_TESTS_ENV).is_ok_and(|value| env_flag_enabled(&value));
    assert!(
        !required,
        "cannot bind a localhost socket and {REQUIRE_SOCKET_TESTS_ENV} is set"
    );
    eprintln!("[socket-bound-test] cannot bind a localhost socket; skipping");
    None
}

#[cfg(test)]
mod tests {
    use super::env_flag_enabled;

    #[test]
    fn test_env_flag_enabled_values() {
        assert!(env_flag_enabled("1"));
        assert!(env_flag_enabled("TRUE"));
        assert!(env_flag_enabled(" yes "));
        assert!(!env_flag_enabled("0"));
        assert!(!env_flag_enabled(""));
    }
}
