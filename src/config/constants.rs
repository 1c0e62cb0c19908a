//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including default paths, download limits, and the retry
//! strategy parameters.

// Default locations (used as Config defaults)
/// Writable directory where the refreshed database is installed
pub const DEFAULT_DATA_DIR: &str = "./geoip_data";
/// Filename of the database inside the data directory (and the bundled fallback)
pub const DEFAULT_DB_FILENAME: &str = "GeoLite2-City.mmdb";

/// Fixed download URL for the gzip-compressed database snapshot.
///
/// The endpoint serves a plain `.gz` file (no authentication, no archive
/// wrapper). Override with `--download-url` or the `GEOIP_DOWNLOAD_URL`
/// environment variable when using a mirror.
pub const DEFAULT_DOWNLOAD_URL: &str =
    "https://geolite.maxmind.com/download/geoip/database/GeoLite2-City.mmdb.gz";

/// Environment variable consulted for a download URL override
pub const DOWNLOAD_URL_ENV: &str = "GEOIP_DOWNLOAD_URL";

// Update cadence
/// Interval between scheduled database refreshes (7 days).
///
/// The first refresh fires one full interval after activation, so a fresh
/// install relies on the bundled database (or a manual update) for its first
/// week.
pub const UPDATE_PERIOD_SECS: u64 = 7 * 24 * 60 * 60;

/// Name used in log lines emitted by the scheduled refresh job
pub const UPDATE_JOB_NAME: &str = "geoip-refresh";

// Download limits
/// Download timeout in seconds (5 minutes for large files)
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 300;
/// Maximum compressed snapshot size in bytes (128MB).
/// Downloads larger than this are aborted to prevent disk/memory exhaustion.
pub const MAX_DOWNLOAD_SIZE: usize = 128 * 1024 * 1024;

/// Chunk size in bytes for streaming decompression
pub const GUNZIP_CHUNK_SIZE: usize = 4096;

// Retry strategy
/// Initial delay in milliseconds before first retry
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;
/// Factor by which retry delay is multiplied on each attempt
pub const RETRY_FACTOR: u64 = 2;
/// Maximum delay between retries in seconds
pub const RETRY_MAX_DELAY_SECS: u64 = 15;
/// Maximum number of download attempts (including the initial attempt)
pub const RETRY_MAX_ATTEMPTS: usize = 3;
