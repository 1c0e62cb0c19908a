//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_DATA_DIR, DEFAULT_DB_FILENAME, DEFAULT_DOWNLOAD_URL, DOWNLOAD_TIMEOUT_SECS,
    UPDATE_PERIOD_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use geoip_local::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/var/lib/geoip"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Writable directory where a refreshed database is installed
    pub data_dir: PathBuf,

    /// Database filename, both in `data_dir` and at the bundled fallback
    pub db_filename: String,

    /// Directory holding the bundled fallback copy of the database.
    /// `None` means "next to the executable".
    pub fallback_dir: Option<PathBuf>,

    /// URL of the gzip-compressed database snapshot
    pub download_url: String,

    /// Whether the periodic refresh job may be activated
    pub auto_update: bool,

    /// Seconds between scheduled refreshes (and before the first one)
    pub update_period_secs: u64,

    /// Download timeout in seconds
    pub download_timeout_secs: u64,
}

impl Config {
    /// The writable install location: `data_dir/db_filename`.
    ///
    /// This is where updates land; lookups may instead read the bundled
    /// fallback when this file does not exist yet.
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_filename)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            db_filename: DEFAULT_DB_FILENAME.to_string(),
            fallback_dir: None,
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            auto_update: true,
            update_period_secs: UPDATE_PERIOD_SECS,
            download_timeout_secs: DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(config.db_filename, DEFAULT_DB_FILENAME);
        assert!(config.fallback_dir.is_none());
        assert_eq!(config.download_url, DEFAULT_DOWNLOAD_URL);
        assert!(config.auto_update);
        assert_eq!(config.update_period_secs, UPDATE_PERIOD_SECS);
        assert_eq!(config.download_timeout_secs, DOWNLOAD_TIMEOUT_SECS);
    }

    #[test]
    fn test_data_path_joins_dir_and_filename() {
        let config = Config {
            data_dir: PathBuf::from("/var/lib/geoip"),
            db_filename: "custom.mmdb".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.data_path(),
            PathBuf::from("/var/lib/geoip/custom.mmdb")
        );
    }
}
