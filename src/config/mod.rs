//! Configuration management for the til application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults. It configures where the database lives and how
//! the application logs.
//!
//! # Environment Variables
//!
//! - `TIL_DB`: Path to the SQLite database (defaults to ~/.local/share/til/til.db)
//! - `TIL_LOG_FORMAT`: Log output format, `text` or `json` (defaults to `text`)
//! - `TIL_LOG_LEVEL`: Default log level when `RUST_LOG` is not set (defaults to `info`)
//!
//! Command-line flags take precedence over everything loaded here.

use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_LOG_LEVEL, ENV_VAR_TIL_DB, ENV_VAR_TIL_LOG_FORMAT,
    ENV_VAR_TIL_LOG_LEVEL, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Configuration for the til application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use til_insights::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/til/til.db"),
///     log_format: "json".to_string(),
///     log_level: "debug".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Location of the SQLite database holding entries and goals.
    ///
    /// Loaded from `TIL_DB` with a fallback to `~/.local/share/til/til.db`.
    /// `~` and environment variable references are expanded.
    pub db_path: PathBuf,

    /// Log output format, `text` or `json`.
    pub log_format: String,

    /// Default log level; `RUST_LOG` overrides it when set.
    pub log_level: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &REDACTED_PLACEHOLDER)
            .field("log_format", &self.log_format)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: PathBuf::from(""),
            log_format: LOG_FORMAT_TEXT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the database path cannot be expanded or
    /// the resulting configuration fails [`Config::validate`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use til_insights::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Using database at {}", config.db_path.display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let db_path_raw = env::var(ENV_VAR_TIL_DB).unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let db_path = expand_path(&db_path_raw)?;

        let log_format = env::var(ENV_VAR_TIL_LOG_FORMAT)
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());

        let log_level = env::var(ENV_VAR_TIL_LOG_LEVEL)
            .map(|v| v.trim().to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let config = Config {
            db_path,
            log_format,
            log_level,
        };
        config.validate()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the database path is empty or relative,
    /// or when the log format is not `text` or `json`.
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        if self.log_format != LOG_FORMAT_TEXT && self.log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Invalid log format '{}'. Expected '{}' or '{}'",
                self.log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(())
    }
}

/// Expands `~` and `$VAR` references in a path.
///
/// # Errors
///
/// Returns `AppError::Config` when a referenced variable is undefined.
pub fn expand_path(raw: &str) -> AppResult<PathBuf> {
    let expanded = shellexpand::full(raw)
        .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
    Ok(PathBuf::from(expanded.into_owned()))
}
