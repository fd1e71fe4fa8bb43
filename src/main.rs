//! CLI entry point for the slack-emojis tool.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use slack_emojis_core::{SlackEmojisClient, run};
use tracing::{debug, error, info, warn};

mod app_config;
mod cli;
mod config_runtime;
mod exit_handler;

use cli::Args;
use exit_handler::ProcessExit;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let loaded_config = app_config::load_config(args.config.as_deref())?;
    let settings = config_runtime::resolve_settings(&args, loaded_config.config.as_ref())?;

    init_tracing(settings.log_level);

    debug!(
        config_path = ?loaded_config.path,
        config_loaded = loaded_config.config.is_some(),
        api_url = %settings.api_url,
        "configuration resolved"
    );
    info!(output_dir = %settings.run.output_dir.display(), "slack-emojis starting");

    let client = SlackEmojisClient::new().with_api_url(settings.api_url);
    let summary = run(&settings.run, &client, &mut io::stdout()).await?;

    let outcome =
        exit_handler::determine_exit_outcome(summary.completed(), summary.failed_count());
    match outcome {
        ProcessExit::Success => info!(
            downloaded = summary.completed(),
            aliases = summary.aliases_skipped,
            "done"
        ),
        ProcessExit::Partial => warn!(
            downloaded = summary.completed(),
            failed = summary.failed_count(),
            "some emoji could not be downloaded"
        ),
        ProcessExit::Failure => error!(
            failed = summary.failed_count(),
            "no emoji could be downloaded"
        ),
    }

    Ok(outcome.into())
}

fn init_tracing(default_level: &str) {
    // Priority: RUST_LOG env var > --quiet > --verbose > config verbosity > info
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty());

    // stdout carries the progress lines; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(!no_color)
        .with_env_filter(filter)
        .try_init();
}
