//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Slack Emoji Downloader.
///
/// Downloads every custom emoji of a Slack workspace into a directory,
/// one file per emoji, named after the emoji.
#[derive(Parser, Debug)]
#[command(name = "slack-emojis")]
#[command(author, version, about)]
pub struct Args {
    /// Slack authentication token [required]
    #[arg(short, long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Emoji output directory (default current directory)
    #[arg(short, long, env = "SLACK_EMOJIS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Config file (default $XDG_CONFIG_HOME/slack-emojis/config.toml)
    #[arg(long, env = "SLACK_EMOJIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the emoji.list endpoint
    #[arg(long, env = "SLACK_EMOJIS_API_URL", hide = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    pub quiet: bool,
}
