//! Error types and the retry strategy for network operations.

use std::path::PathBuf;
use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;
use tokio_retry::strategy::ExponentialBackoff;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for a single IP lookup.
///
/// A missing record is not an error (lookups return `Ok(None)` for unknown
/// addresses); these variants cover the cases where no answer can be given
/// at all.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The resolved database file could not be opened or parsed.
    #[error("GeoIP database unavailable at {path}: {reason}")]
    DatabaseUnavailable {
        /// Path that was resolved and failed to open
        path: PathBuf,
        /// Underlying open/parse failure
        reason: String,
    },

    /// The input string is not a syntactically valid IPv4 address.
    #[error("not a valid IPv4 address: {0:?}")]
    InvalidInput(String),
}

/// Error types for a database update.
///
/// The two variants identify which half of the pipeline failed: the network
/// transfer, or everything after it (decompression, validation, install).
/// Either way the previously installed database is left untouched.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// Network or transfer error while fetching the snapshot.
    #[error("download failed: {0}")]
    Download(String),

    /// Decompression, validation, or filesystem error installing the snapshot.
    #[error("install failed: {0}")]
    Install(String),
}

/// Creates an exponential backoff retry strategy for downloads.
///
/// Returns a retry strategy configured with:
/// - Initial delay: `RETRY_INITIAL_DELAY_MS` milliseconds
/// - Backoff factor: `RETRY_FACTOR` (doubles delay each retry)
/// - Maximum delay: `RETRY_MAX_DELAY_SECS` seconds
/// - At most `RETRY_MAX_ATTEMPTS` attempts in total
pub fn get_retry_strategy() -> std::iter::Take<ExponentialBackoff> {
    ExponentialBackoff::from_millis(crate::config::RETRY_INITIAL_DELAY_MS)
        .factor(crate::config::RETRY_FACTOR)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_ATTEMPTS - 1)
}
