//! Optional config file holding per-user defaults.
//!
//! The file is a flat list of `key = "value"` lines, a small subset of TOML:
//!
//! ```toml
//! # ~/.config/slack-emojis/config.toml
//! token = "xoxp-..."
//! output_dir = "/srv/emojis"
//! verbosity = "quiet"
//! ```

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use url::Url;

const CONFIG_DIR_NAME: &str = "slack-emojis";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Defaults read from the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub token: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub api_url: Option<String>,
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "token" => {
                if value.trim().is_empty() {
                    bail!("`token` must not be empty");
                }
                self.token = Some(value);
            }
            "output_dir" => self.output_dir = Some(PathBuf::from(value)),
            "api_url" => {
                check_api_url(&value)?;
                self.api_url = Some(value);
            }
            "verbosity" => self.verbosity = Some(value.parse()?),
            unknown => bail!("Unknown configuration key: '{unknown}'"),
        }
        Ok(())
    }
}

fn check_api_url(value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("`api_url` is not a URL: {value}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("`api_url` must use http or https: {value}");
    }
    Ok(())
}

/// Log noise level a config file may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl FromStr for VerbositySetting {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "default" => Ok(Self::Default),
            "verbose" => Ok(Self::Verbose),
            "quiet" => Ok(Self::Quiet),
            "debug" => Ok(Self::Debug),
            other => Err(anyhow!(
                "`verbosity` must be one of default, verbose, quiet, debug (got '{other}')"
            )),
        }
    }
}

/// Result of looking for a config file.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Path that was consulted, if any could be resolved.
    pub path: Option<PathBuf>,
    /// Parsed contents; `None` when no file was found at the default path.
    pub config: Option<FileConfig>,
}

/// `$XDG_CONFIG_HOME/slack-emojis/config.toml`, falling back to
/// `$HOME/.config/slack-emojis/config.toml`.
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    let base = match non_empty_env("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => PathBuf::from(non_empty_env("HOME")?).join(".config"),
    };
    Some(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

fn non_empty_env(name: &str) -> Option<OsString> {
    env::var_os(name).filter(|value| !value.is_empty())
}

/// Loads `explicit_path`, or the default path when none is given.
///
/// An explicit path must exist. A missing default file is not an error.
pub fn load_config(explicit_path: Option<&Path>) -> Result<LoadedConfig> {
    let (path, required) = match explicit_path {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (resolve_default_config_path(), false),
    };

    let config = match path.as_deref() {
        Some(path) if required || path.exists() => Some(read_config_file(path)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut config = FileConfig::default();
    for (index, line) in raw.lines().enumerate() {
        let line_number = index + 1;
        let Some((key, value)) = tokenize_line(line)
            .with_context(|| format!("Invalid config syntax on line {line_number}"))?
        else {
            continue;
        };
        config
            .set(key, value)
            .with_context(|| format!("Invalid config entry on line {line_number}"))?;
    }
    Ok(config)
}

/// Splits one line into key and unquoted value. Blank and comment-only lines
/// yield `None`.
fn tokenize_line(line: &str) -> Result<Option<(&str, String)>> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (key, rest) = line
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key = \"value\""))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("missing key before '='");
    }

    let (value, trailing) = read_quoted(rest.trim_start())?;
    let trailing = trailing.trim();
    if !trailing.is_empty() && !trailing.starts_with('#') {
        bail!("unexpected text after value of `{key}`: {trailing}");
    }
    Ok(Some((key, value)))
}

/// Reads a double-quoted string with `\"` and `\\` escapes, returning the
/// value and whatever follows the closing quote.
fn read_quoted(input: &str) -> Result<(String, &str)> {
    let Some(body) = input.strip_prefix('"') else {
        bail!("values must be double-quoted strings");
    };

    let mut value = String::new();
    let mut chars = body.char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => return Ok((value, &body[offset + 1..])),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\'))) => value.push(escaped),
                Some((_, other)) => bail!("unsupported escape sequence '\\{other}'"),
                None => break,
            },
            other => value.push(other),
        }
    }
    bail!("unterminated string")
}
