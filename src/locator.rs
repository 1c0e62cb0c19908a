//! Database path resolution.
//!
//! The lookup and status paths never assume the refreshed database exists:
//! a fresh install serves from a bundled copy shipped next to the executable
//! until the first update lands in the data directory.

use std::path::{Path, PathBuf};

use crate::config::Config;

/// Resolves the on-disk location of the current database.
///
/// Prefers `data_dir/db_filename` when that file exists, otherwise falls
/// back to the bundled copy. The decision is made at every call, never
/// cached, so a lookup issued right after a successful update sees the
/// freshly installed file.
///
/// This function always returns a path; existence of the returned path is
/// not guaranteed (the fallback may be missing too). Callers surface that as
/// an open failure.
pub fn resolve_database_path(config: &Config) -> PathBuf {
    let installed = config.data_path();
    if installed.is_file() {
        return installed;
    }
    fallback_dir(config).join(&config.db_filename)
}

/// Directory holding the bundled fallback copy.
///
/// Defaults to the directory of the running executable; configurable for
/// deployments that ship the bundled copy elsewhere (and for tests).
fn fallback_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.fallback_dir {
        return dir.clone();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
