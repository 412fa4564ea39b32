pub(crate) mod color;
pub(crate) mod config;
pub(crate) mod convert;
pub(crate) mod lookup;
pub(crate) mod stats;
pub(crate) mod update;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::CliError;

/// Default file names inside the data directory.
pub(crate) const CORE_DB: &str = "Project64.rdb";
pub(crate) const DETAILS_DB: &str = "Project64.rdx";
pub(crate) const AUDIO_DB: &str = "Audio.rdb";
pub(crate) const VIDEO_DB: &str = "Video.rdb";
pub(crate) const INFO_TEXT: &str = "RDB Info.txt";
pub(crate) const SUMMARY_FILE: &str = "update_summary.md";

/// An explicit path, or `name` inside the data directory.
pub(crate) fn path_or_default(explicit: Option<PathBuf>, data_dir: &Path, name: &str) -> PathBuf {
    explicit.unwrap_or_else(|| data_dir.join(name))
}

/// `<path>.bak`, next to the original.
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Open the store for reading, refusing to create one where none exists.
pub(crate) fn open_existing_database(path: &Path) -> Result<Option<Connection>, CliError> {
    if !path.exists() {
        log::warn!("No game database found at {}", path.display());
        log::info!("Run 'romdb convert' to create one.");
        return Ok(None);
    }
    romdb_db::open_database(path)
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open game database: {e}")))
}
