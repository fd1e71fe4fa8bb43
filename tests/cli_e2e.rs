//! End-to-end CLI tests for the slack-emojis binary.

// `Command::cargo_bin` is deprecated in newer assert_cmd releases.
#![allow(deprecated)]

mod support;
use support::socket_guard::start_mock_server_or_skip;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A command isolated from the caller's token, env overrides and config file.
fn slack_emojis(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("slack-emojis").unwrap();
    cmd.env_remove("SLACK_TOKEN")
        .env_remove("SLACK_EMOJIS_OUTPUT")
        .env_remove("SLACK_EMOJIS_CONFIG")
        .env_remove("SLACK_EMOJIS_API_URL")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn write_config(config_home: &std::path::Path, contents: &str) {
    let config_dir = config_home.join("slack-emojis");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), contents).unwrap();
}

fn toml_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "\\\\")
}

async fn mount_list(server: &MockServer, token: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/emoji.list"))
        .and(query_param("token", token))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[test]
fn test_binary_help_lists_flags() {
    let temp = TempDir::new().unwrap();
    slack_emojis(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--token"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_binary_missing_token_fails() {
    let temp = TempDir::new().unwrap();
    slack_emojis(temp.path())
        .arg("-o")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("token is required"));
}

#[test]
fn test_binary_output_is_file_fails() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("emojis");
    std::fs::write(&target, b"").unwrap();

    slack_emojis(temp.path())
        .args(["-t", "xoxp-test", "-q", "--api-url", "http://127.0.0.1:9/api/emoji.list"])
        .arg("-o")
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_binary_rejects_invalid_config_file() {
    let temp = TempDir::new().unwrap();
    write_config(temp.path(), "concurrency = \"4\"\n");

    slack_emojis(temp.path())
        .args(["-t", "xoxp-test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[tokio::test]
async fn test_binary_downloads_emoji_and_prints_progress() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_list(
        &server,
        "xoxp-test",
        json!({
            "ok": true,
            "emoji": {
                "a": format!("{}/y/a.jpg", server.uri()),
                "b": "alias:a"
            }
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/y/a.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out");

    slack_emojis(temp.path())
        .args(["--token", "xoxp-test", "-q"])
        .arg("--api-url")
        .arg(format!("{}/api/emoji.list", server.uri()))
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("download: a.jpg\n");

    assert_eq!(std::fs::read(output.join("a.jpg")).unwrap(), b"jpeg");
    assert!(!output.join("b.jpg").exists());
}

#[tokio::test]
async fn test_binary_reads_token_and_output_from_config_file() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_list(
        &server,
        "from-config",
        json!({
            "ok": true,
            "emoji": { "cfg": format!("{}/cfg.png", server.uri()) }
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/cfg.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("configured");
    write_config(
        temp.path(),
        &format!(
            "token = \"from-config\"\noutput_dir = \"{}\"\napi_url = \"{}/api/emoji.list\"\nverbosity = \"quiet\"\n",
            toml_path(&output),
            server.uri()
        ),
    );

    slack_emojis(temp.path())
        .assert()
        .success()
        .stdout("download: cfg.png\n");

    assert!(output.join("cfg.png").is_file());
}

#[tokio::test]
async fn test_binary_token_from_environment() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_list(&server, "from-env", json!({ "ok": true, "emoji": {} })).await;
    let temp = TempDir::new().unwrap();

    slack_emojis(temp.path())
        .env("SLACK_TOKEN", "from-env")
        .env("SLACK_EMOJIS_API_URL", format!("{}/api/emoji.list", server.uri()))
        .arg("-q")
        .arg("-o")
        .arg(temp.path().join("out"))
        .assert()
        .success()
        .stdout("");
}

#[tokio::test]
async fn test_binary_api_error_exits_non_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_list(
        &server,
        "xoxp-bad",
        json!({ "ok": false, "error": "invalid_auth" }),
    )
    .await;
    let temp = TempDir::new().unwrap();

    slack_emojis(temp.path())
        .args(["-t", "xoxp-bad", "-q"])
        .arg("--api-url")
        .arg(format!("{}/api/emoji.list", server.uri()))
        .arg("-o")
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid_auth"));
}

#[tokio::test]
async fn test_binary_exit_code_partial_success_is_one() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_list(
        &server,
        "xoxp-test",
        json!({
            "ok": true,
            "emoji": {
                "fail": format!("{}/fail.png", server.uri()),
                "ok": format!("{}/ok.png", server.uri())
            }
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/fail.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ok.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png".to_vec()))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    let assert = slack_emojis(temp.path())
        .args(["-t", "xoxp-test", "-q"])
        .arg("--api-url")
        .arg(format!("{}/api/emoji.list", server.uri()))
        .arg("-o")
        .arg(temp.path().join("out"))
        .assert()
        .failure();

    assert_eq!(
        assert.get_output().status.code(),
        Some(1),
        "partial success must yield exit code 1"
    );
    assert_eq!(
        String::from_utf8_lossy(&assert.get_output().stdout),
        "download: ok.png\n"
    );
}
