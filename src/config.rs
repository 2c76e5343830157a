//! Configuration loaded from `config.toml`.
//!
//! The default location is `$XDG_CONFIG_HOME/zcalc/config.toml`. Every field
//! is optional; a missing default file simply yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::FormatOptions;

/// Longest equation the keypad and CLI will hand to the evaluator.
pub const DEFAULT_MAX_INPUT_LEN: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of characters in one equation.
    pub max_input_len: usize,
    /// Result formatting.
    pub format: FormatOptions,
    /// Log filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            format: FormatOptions::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str::<Config>(text).context("Failed to parse configuration")
    }

    /// Load the configuration from an explicit path, or from the default
    /// location when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }
}

/// Default configuration file location.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("zcalc").join("config.toml"))
}
