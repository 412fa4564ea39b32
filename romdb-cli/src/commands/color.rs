use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romdb_db::CARTRIDGE_COLOR_SEEDS;

use super::open_existing_database;
use crate::CliError;
use crate::settings::ResolvedPaths;

/// Entry point for `set-color`.
pub(crate) fn run_set_color(
    paths: &ResolvedPaths,
    rom_id: &str,
    color: &str,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(&paths.database)? else {
        return Ok(());
    };

    let game_id = romdb_db::find_game_id(&conn, rom_id)
        .map_err(|e| CliError::database(format!("Lookup failed: {e}")))?
        .ok_or_else(|| CliError::invalid_argument(format!("No game found for {rom_id}")))?;

    let assigned = romdb_db::set_game_cartridge_color(&conn, game_id, color)
        .map_err(|e| CliError::database(format!("Failed to set cartridge color: {e}")))?;
    if !assigned {
        return Err(CliError::invalid_argument(format!(
            "Unknown cartridge color '{color}' (expected one of: {})",
            CARTRIDGE_COLOR_SEEDS.join(", ")
        )));
    }

    log::info!(
        "{} cartridge color set to {}",
        rom_id.if_supports_color(Stdout, |t| t.cyan()),
        color.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use romdb_catalog::GameRecord;

    const ROM_ID: &str = "8F1B2A5A-FC3E9E0E-C:45";

    fn setup() -> (tempfile::TempDir, ResolvedPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = ResolvedPaths {
            data_dir: dir.path().to_path_buf(),
            database: dir.path().join("rom_database.sqlite"),
        };
        let conn = romdb_db::open_database(&paths.database).unwrap();
        romdb_db::upsert_game(&conn, &GameRecord::new(ROM_ID)).unwrap();
        (dir, paths)
    }

    #[test]
    fn assigns_seeded_color() {
        let (_dir, paths) = setup();
        run_set_color(&paths, ROM_ID, "Gold").unwrap();

        let conn = romdb_db::open_database(&paths.database).unwrap();
        let game = romdb_db::find_game_by_rom_id(&conn, ROM_ID).unwrap().unwrap();
        assert_eq!(game.cartridge_color.as_deref(), Some("Gold"));
    }

    #[test]
    fn rejects_unknown_color_and_game() {
        let (_dir, paths) = setup();
        let err = run_set_color(&paths, ROM_ID, "Purple").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));

        let err = run_set_color(&paths, "0000-0000-C:45", "Gold").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
