use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romdb_import::{ConvertSources, LogProgress};
use romdb_rdb::read_text;

use super::{AUDIO_DB, CORE_DB, DETAILS_DB, INFO_TEXT, VIDEO_DB, path_or_default};
use crate::CliError;
use crate::settings::ResolvedPaths;

/// Input file overrides for `convert`.
#[derive(Debug, Default)]
pub(crate) struct ConvertInputs {
    pub core: Option<PathBuf>,
    pub details: Option<PathBuf>,
    pub audio: Option<PathBuf>,
    pub video: Option<PathBuf>,
    pub info: Option<PathBuf>,
}

/// Read an optional input; a missing file is skipped.
fn read_optional(path: &Path) -> Result<Option<String>, CliError> {
    if !path.exists() {
        log::debug!("{} not found", path.display());
        return Ok(None);
    }
    Ok(Some(read_text(path)?))
}

/// Entry point for `convert`.
pub(crate) fn run_convert(
    paths: &ResolvedPaths,
    inputs: ConvertInputs,
    fresh: bool,
) -> Result<(), CliError> {
    let data_dir = &paths.data_dir;
    let core_path = path_or_default(inputs.core, data_dir, CORE_DB);

    // The core database is required; everything else is optional.
    let core = read_text(&core_path)?;
    let details = read_optional(&path_or_default(inputs.details, data_dir, DETAILS_DB))?;
    let audio = read_optional(&path_or_default(inputs.audio, data_dir, AUDIO_DB))?;
    let video = read_optional(&path_or_default(inputs.video, data_dir, VIDEO_DB))?;
    let info = read_optional(&path_or_default(inputs.info, data_dir, INFO_TEXT))?;

    if fresh && paths.database.exists() {
        log::info!("Removing existing database {}", paths.database.display());
        std::fs::remove_file(&paths.database)?;
    }

    let conn = romdb_db::open_database(&paths.database)
        .map_err(|e| CliError::database(format!("Failed to open game database: {e}")))?;

    let sources = ConvertSources {
        core: &core,
        details: details.as_deref(),
        audio: audio.as_deref(),
        video: video.as_deref(),
        descriptions: info.as_deref(),
    };
    romdb_import::convert(&conn, &sources, Some(&LogProgress))?;

    let stats = romdb_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query database stats: {e}")))?;

    crate::log_blank();
    log::info!(
        "Database written to {} with {} games",
        paths.database.display().if_supports_color(Stdout, |t| t.cyan()),
        stats.games.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  - {} games have cartridge codes", stats.with_cartridge_code);
    log::info!("  - {} games have player count information", stats.with_players);
    log::info!("  - {} games support force feedback/rumble", stats.with_rumble);

    Ok(())
}
