//! Runtime settings for the dashboard and the headless commands.
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults ([`ApiConfig::default`], log file `<app name>.log`;
//!    the log level comes from `RUST_LOG` or falls back to `info`).
//! 2. An optional TOML file passed with `--config`.
//! 3. Command-line flags.
//!
//! ### File format
//!
//! | Key            | Type    | Notes                                  |
//! |----------------|---------|----------------------------------------|
//! | `base_url`     | string  | e.g. `https://rates.example.com/api`   |
//! | `timeout_secs` | integer | request timeout, must be non-zero      |
//! | `log_level`    | string  | level or full `RUST_LOG`-style filter  |
//! | `log_file`     | path    | dashboard log destination              |
//!
//! ```toml
//! base_url = "http://localhost:8080/api"
//! timeout_secs = 5
//! log_level = "debug"
//! ```
use std::path::{Path, PathBuf};
use std::time::Duration;

use rates_core::{ApiConfig, ApiError};
use serde::Deserialize;

use crate::logging::app_name;

pub const DEFAULT_LOG_LEVEL: &str = "info";

// ---------------------------------------------------------------------------
// File and command-line layers
// ---------------------------------------------------------------------------

/// Mirrors the TOML file; every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The merged settings failed [`ApiConfig::validate`].
    #[error(transparent)]
    Invalid(#[from] ApiError),
}

// ---------------------------------------------------------------------------
// Resolved settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api: ApiConfig,
    /// Explicit level; `None` leaves the startup filter in place.
    pub log_level: Option<String>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            log_level: None,
            log_file: PathBuf::from(format!("{}.log", app_name())),
        }
    }
}

impl Settings {
    /// Merge the layers over the defaults and validate the result.
    ///
    /// # Errors
    ///
    /// * [ConfigError::Invalid] – the merged API settings are unusable.
    pub fn resolve(
        file: FileSettings,
        cli: Overrides,
    ) -> Result<Self, ConfigError> {
        let mut settings = Self::default();

        if let Some(url) = cli.base_url.or(file.base_url) {
            settings.api.base_url = url;
        }
        if let Some(secs) = cli.timeout_secs.or(file.timeout_secs) {
            settings.api.timeout = Duration::from_secs(secs);
        }
        settings.log_level = cli.log_level.or(file.log_level);
        if let Some(path) = cli.log_file.or(file.log_file) {
            settings.log_file = path;
        }

        settings.api.validate()?;
        Ok(settings)
    }

    /// Read the optional config file and resolve it with `cli`.
    ///
    /// # Errors
    ///
    /// * [ConfigError::Read] – the file cannot be read.
    /// * [ConfigError::Parse] – the file is not valid TOML or has unknown
    ///   keys.
    /// * [ConfigError::Invalid] – see [Settings::resolve].
    pub fn load(
        config_path: Option<&Path>,
        cli: Overrides,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => load_from_file(path)?,
            None => FileSettings::default(),
        };
        Self::resolve(file, cli)
    }
}

/// Parse TOML text into [FileSettings].
pub fn load_from_str(input: &str) -> Result<FileSettings, ConfigError> {
    Ok(toml::from_str(input)?)
}

pub fn load_from_file(path: &Path) -> Result<FileSettings, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
