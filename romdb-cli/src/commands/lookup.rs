use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use romdb_db::GameRow;

use super::open_existing_database;
use crate::CliError;
use crate::settings::ResolvedPaths;

/// What to look a game up by.
#[derive(Debug)]
pub(crate) enum LookupKey {
    RomId(String),
    Crc { crc1: u32, crc2: u32, country: String },
}

/// Parse a CRC word given as hex, with or without a `0x` prefix.
pub(crate) fn parse_crc(s: &str) -> Result<u32, String> {
    let digits = s.trim().trim_start_matches("0x").trim_start_matches("0X");
    u32::from_str_radix(digits, 16).map_err(|e| format!("invalid CRC '{s}': {e}"))
}

/// Entry point for `lookup`.
pub(crate) fn run_lookup(paths: &ResolvedPaths, key: LookupKey) -> Result<(), CliError> {
    let Some(conn) = open_existing_database(&paths.database)? else {
        return Ok(());
    };

    let game = match &key {
        LookupKey::RomId(rom_id) => romdb_db::find_game_by_rom_id(&conn, rom_id),
        LookupKey::Crc { crc1, crc2, country } => {
            romdb_db::find_game_by_crc(&conn, *crc1, *crc2, country)
        }
    }
    .map_err(|e| CliError::database(format!("Lookup failed: {e}")))?;

    match game {
        Some(game) => print_game(&game),
        None => log::warn!("No game found for {key:?}"),
    }
    Ok(())
}

fn print_game(game: &GameRow) {
    let title = game.good_name.as_deref().unwrap_or("(untitled)");
    log::info!("{}", title.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  ROM ID:         {}", game.rom_id.if_supports_color(Stdout, |t| t.cyan()));

    let fields = [
        ("Internal name", game.internal_name.clone()),
        ("Status", game.status.clone()),
        (
            "Region",
            game.region_name
                .as_ref()
                .map(|name| format!("{name} ({})", game.region_code.as_deref().unwrap_or("?"))),
        ),
        ("Cartridge code", game.cartridge_code.clone()),
        ("Developer", game.developer.clone()),
        ("Genre", game.genre.clone()),
        ("Release date", game.release_date.clone()),
        ("Players", game.players.map(|p| p.to_string())),
        (
            "Rumble",
            game.force_feedback.map(|f| if f { "Yes" } else { "No" }.to_string()),
        ),
        ("Cartridge color", game.cartridge_color.clone()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            log::info!("  {:<15} {}", format!("{label}:"), value);
        }
    }
}
