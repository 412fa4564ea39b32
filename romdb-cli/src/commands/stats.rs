use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::open_existing_database;
use crate::CliError;
use crate::settings::ResolvedPaths;

/// Entry point for `stats`.
pub(crate) fn run_stats(paths: &ResolvedPaths) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(&paths.database)? else {
        return Ok(());
    };

    let stats = romdb_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query database stats: {e}")))?;
    let version = romdb_db::database_version(&conn)
        .map_err(|e| CliError::database(format!("Failed to read database version: {e}")))?;
    let regions = romdb_db::list_regions(&conn)
        .map_err(|e| CliError::database(format!("Failed to list regions: {e}")))?;

    log::info!(
        "{}",
        "Game Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", paths.database.display());
    log::info!("  Version:  {}", version.as_deref().unwrap_or("Unknown"));
    crate::log_blank();
    log::info!("  Games:            {:>8}", stats.games);
    log::info!("  Cartridge codes:  {:>8}", stats.with_cartridge_code);
    log::info!("  Player counts:    {:>8}", stats.with_players);
    log::info!("  Rumble:           {:>8}", stats.with_rumble);
    log::info!("  Regions:          {:>8}", stats.regions);
    log::info!("  Developers:       {:>8}", stats.developers);
    log::info!("  Genres:           {:>8}", stats.genres);
    log::info!("  Descriptions:     {:>8}", stats.setting_descriptions);
    log::info!("  Metadata entries: {:>8}", stats.metadata_entries);

    if !regions.is_empty() {
        crate::log_blank();
        log::info!("{}", "Regions".if_supports_color(Stdout, |t| t.bold()));
        for region in &regions {
            log::info!("  {}  {}", region.code.if_supports_color(Stdout, |t| t.cyan()), region.name);
        }
    }

    Ok(())
}
