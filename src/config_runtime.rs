//! Merges command line, environment and config file into one run setup.
//!
//! Flags and their environment fallbacks are resolved by clap; the config
//! file only fills settings neither of them provided.

use std::path::PathBuf;

use anyhow::{Result, bail};
use slack_emojis_core::{DEFAULT_API_URL, RunConfig};

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Everything `main` needs to build the client and start the pipeline.
#[derive(Debug)]
pub(crate) struct ResolvedSettings {
    pub(crate) run: RunConfig,
    pub(crate) api_url: String,
    pub(crate) log_level: &'static str,
}

pub(crate) fn resolve_settings(
    args: &Args,
    file_config: Option<&FileConfig>,
) -> Result<ResolvedSettings> {
    let token = args
        .token
        .clone()
        .filter(|token| !token.trim().is_empty())
        .or_else(|| file_config.and_then(|cfg| cfg.token.clone()));
    let Some(token) = token else {
        bail!(
            "a Slack token is required.\n  \
             Pass --token, set SLACK_TOKEN, or add `token = \"...\"` to the config file"
        );
    };

    let output_dir = args
        .output
        .clone()
        .or_else(|| file_config.and_then(|cfg| cfg.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from("."));

    let api_url = args
        .api_url
        .clone()
        .or_else(|| file_config.and_then(|cfg| cfg.api_url.clone()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(ResolvedSettings {
        run: RunConfig::new(token, output_dir),
        api_url,
        log_level: resolve_default_log_level(args, file_config.and_then(|cfg| cfg.verbosity)),
    })
}

/// Picks the default log level: `--quiet`, then `-v` count, then the config
/// file's `verbosity`. `RUST_LOG` still wins over the result.
pub(crate) fn resolve_default_log_level(
    args: &Args,
    config_verbosity: Option<VerbositySetting>,
) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => {}
        1 => return "debug",
        _ => return "trace",
    }
    match config_verbosity {
        Some(VerbositySetting::Quiet) => "error",
        Some(VerbositySetting::Verbose) => "debug",
        Some(VerbositySetting::Debug) => "trace",
        Some(VerbositySetting::Default) | None => "info",
    }
}
