//! Configuration handling for the `soundex` binary
//!
//! Reads an optional `soundex.toml` from the config directory.
//!
//! ## Environment Variables
//!
//! The following environment variables override config file settings:
//!
//! - `SOUNDEX_FORMAT` - Output format (`plain` or `json`)
//! - `SOUNDEX_SKIP_INVALID` - Skip words that cannot be encoded (`true`/`false`)
//! - `SOUNDEX_LOG` - Log filter directive, e.g. `soundex=debug`
//!
//! These can be set in a `.env` file in the config directory.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{SoundexError, SoundexResult};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "soundex.toml";

/// Environment variable names
pub const ENV_FORMAT: &str = "SOUNDEX_FORMAT";
pub const ENV_SKIP_INVALID: &str = "SOUNDEX_SKIP_INVALID";
pub const ENV_LOG: &str = "SOUNDEX_LOG";

/// How encoded words are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One code per line
    #[default]
    Plain,
    /// One `{"word": ..., "code": ...}` object per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = SoundexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "json" => Ok(Self::Json),
            other => Err(SoundexError::Config(format!(
                "unknown output format '{}'",
                other
            ))),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub format: OutputFormat,
    /// Log and skip words that fail to encode instead of aborting
    #[serde(default)]
    pub skip_invalid: bool,
    /// `tracing` filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "soundex=warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            skip_invalid: false,
            log_filter: default_log_filter(),
        }
    }
}

/// An environment override whose value could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for RejectedOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignoring {}={:?}: {}", self.key, self.value, self.reason)
    }
}

impl Config {
    /// Load configuration from a directory
    ///
    /// Reads `soundex.toml` if it exists, then applies overrides from the
    /// process environment and from a `.env` file in the directory. Process
    /// variables win over the file. A missing config file yields the defaults.
    ///
    /// Overrides that could not be applied are returned so the caller can
    /// report them once logging is up.
    pub fn load(dir: &Path) -> SoundexResult<(Self, Vec<RejectedOverride>)> {
        let dotenv = read_env_file(&dir.join(".env"));

        let config_path = dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path).map_err(|e| {
                SoundexError::Config(format!("{}: {}", config_path.display(), e))
            })?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        let rejected = config.apply_overrides(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| dotenv.get(key).cloned())
        });
        Ok((config, rejected))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> SoundexResult<Self> {
        toml::from_str(content).map_err(|e| SoundexError::Config(e.to_string()))
    }

    /// Apply overrides from an arbitrary variable lookup. Empty `SOUNDEX_LOG`
    /// is ignored; unparsable values are left out and returned.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Vec<RejectedOverride>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();

        if let Some(value) = lookup(ENV_FORMAT) {
            match value.parse() {
                Ok(format) => self.format = format,
                Err(e) => rejected.push(RejectedOverride {
                    key: ENV_FORMAT,
                    value,
                    reason: e.to_string(),
                }),
            }
        }

        if let Some(value) = lookup(ENV_SKIP_INVALID) {
            match value.trim().parse::<bool>() {
                Ok(skip) => self.skip_invalid = skip,
                Err(e) => rejected.push(RejectedOverride {
                    key: ENV_SKIP_INVALID,
                    value,
                    reason: e.to_string(),
                }),
            }
        }

        if let Some(filter) = lookup(ENV_LOG) {
            if !filter.is_empty() {
                self.log_filter = filter;
            }
        }

        rejected
    }
}

/// Read `KEY=value` pairs from a dotenv file without touching the process
/// environment. A missing or unreadable file yields no entries.
fn read_env_file(path: &Path) -> HashMap<String, String> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => iter.filter_map(Result::ok).collect(),
        Err(_) => HashMap::new(),
    }
}
