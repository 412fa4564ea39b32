//! User settings (`<config dir>/romdb/settings.toml`) and path resolution.
//!
//! ```toml
//! [paths]
//! data_dir = "/path/to/data"
//! database = "/path/to/rom_database.sqlite"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CliError;

/// File name of the SQLite database when nothing else is configured.
pub(crate) const DEFAULT_DATABASE_NAME: &str = "rom_database.sqlite";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub(crate) struct PathSettings {
    /// Directory holding `Project64.rdb` and friends.
    pub data_dir: Option<PathBuf>,
    pub database: Option<PathBuf>,
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romdb").join("settings.toml")
}

/// Load settings from `path`. A missing file yields the defaults.
pub(crate) fn load_settings_from(path: &Path) -> Result<Settings, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(e.into()),
    };
    toml::from_str(&contents)
        .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
}

pub(crate) fn load_settings() -> Result<Settings, CliError> {
    load_settings_from(&settings_path())
}

/// Paths every command works from, after applying the priority chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedPaths {
    pub data_dir: PathBuf,
    pub database: PathBuf,
}

impl Settings {
    /// Resolve paths using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. The `[paths]` table in `settings.toml`
    /// 3. Current working directory, with the database inside the data directory
    pub(crate) fn resolve(
        &self,
        data_dir: Option<PathBuf>,
        database: Option<PathBuf>,
    ) -> ResolvedPaths {
        let data_dir = data_dir
            .or_else(|| self.paths.data_dir.clone())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let database = database
            .or_else(|| self.paths.database.clone())
            .unwrap_or_else(|| data_dir.join(DEFAULT_DATABASE_NAME));
        ResolvedPaths { data_dir, database }
    }
}
