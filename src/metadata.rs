//! Installed-database status reporting.
//!
//! Backs the `status` admin action: which file lookups would read right now,
//! whether it exists, how stale it is, and the build date baked into the
//! database itself when the file parses.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use maxminddb::Reader;
use serde::Serialize;

use crate::config::Config;
use crate::locator::resolve_database_path;

/// A point-in-time snapshot of the installed database.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    /// Path lookups would resolve to right now
    pub path: PathBuf,
    /// Whether a file exists at that path
    pub exists: bool,
    /// File size in bytes, when the file exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Filesystem modification time, when the file exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    /// Build epoch from the database's own metadata, when the file parses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_epoch: Option<u64>,
}

/// Inspects the currently resolved database file.
///
/// Never fails: a missing or unreadable file is reported through the
/// `exists`/`None` fields rather than an error, since "no database yet" is
/// an ordinary state on a fresh install.
pub fn database_status(config: &Config) -> DatabaseStatus {
    let path = resolve_database_path(config);

    let fs_meta = std::fs::metadata(&path).ok();
    let exists = fs_meta.as_ref().map(|m| m.is_file()).unwrap_or(false);
    let size_bytes = fs_meta.as_ref().filter(|m| m.is_file()).map(|m| m.len());
    let modified = fs_meta
        .as_ref()
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Utc>::from);

    let build_epoch = if exists {
        Reader::open_readfile(&path)
            .ok()
            .map(|reader| reader.metadata.build_epoch)
    } else {
        None
    };

    DatabaseStatus {
        path,
        exists,
        size_bytes,
        modified,
        build_epoch,
    }
}
