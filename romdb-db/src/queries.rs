//! Read queries for the game database.
//!
//! Lookup by ROM identifier or CRC pair, per-category settings, the
//! database version, and summary statistics.

use romdb_catalog::{candidate_rom_ids, Region, SettingCategory};
use rusqlite::{params, Connection, Row};

use crate::operations::OperationError;

/// A game row with its reference entities resolved to names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub id: i64,
    pub rom_id: String,
    pub good_name: Option<String>,
    pub internal_name: Option<String>,
    pub status: Option<String>,
    pub region_code: Option<String>,
    pub region_name: Option<String>,
    pub cartridge_code: Option<String>,
    pub developer: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<String>,
    pub release_year: Option<i32>,
    pub players: Option<u8>,
    pub force_feedback: Option<bool>,
    pub cartridge_color: Option<String>,
}

const GAME_SELECT: &str = "
    SELECT g.id, g.rom_id, g.good_name, g.internal_name, g.status,
           r.code, r.name, g.cartridge_code, d.name, gn.name,
           g.release_date, g.release_year, g.players, g.force_feedback, c.name
    FROM games g
    LEFT JOIN regions r ON r.id = g.region_id
    LEFT JOIN developers d ON d.id = g.developer_id
    LEFT JOIN genres gn ON gn.id = g.genre_id
    LEFT JOIN cartridge_colors c ON c.id = g.cartridge_color_id";

fn row_to_game(row: &Row) -> rusqlite::Result<GameRow> {
    Ok(GameRow {
        id: row.get(0)?,
        rom_id: row.get(1)?,
        good_name: row.get(2)?,
        internal_name: row.get(3)?,
        status: row.get(4)?,
        region_code: row.get(5)?,
        region_name: row.get(6)?,
        cartridge_code: row.get(7)?,
        developer: row.get(8)?,
        genre: row.get(9)?,
        release_date: row.get(10)?,
        release_year: row.get(11)?,
        players: row.get(12)?,
        force_feedback: row.get(13)?,
        cartridge_color: row.get(14)?,
    })
}

// ── Game Lookups ────────────────────────────────────────────────────────────

/// Find a game by its exact ROM identifier.
pub fn find_game_by_rom_id(
    conn: &Connection,
    rom_id: &str,
) -> Result<Option<GameRow>, OperationError> {
    let sql = format!("{GAME_SELECT} WHERE g.rom_id = ?1");
    match conn.query_row(&sql, params![rom_id], row_to_game) {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find a game from the two header CRCs and country code.
///
/// Tries each identifier spelling the database may use, most specific first,
/// and returns the first hit.
pub fn find_game_by_crc(
    conn: &Connection,
    crc1: u32,
    crc2: u32,
    country: &str,
) -> Result<Option<GameRow>, OperationError> {
    for rom_id in candidate_rom_ids(crc1, crc2, country) {
        if let Some(game) = find_game_by_rom_id(conn, &rom_id)? {
            return Ok(Some(game));
        }
    }
    Ok(None)
}

/// Value of one per-game setting in the given category.
pub fn game_setting(
    conn: &Connection,
    game_id: i64,
    category: SettingCategory,
    name: &str,
) -> Result<Option<String>, OperationError> {
    let sql = format!(
        "SELECT setting_value FROM {} WHERE game_id = ?1 AND setting_name = ?2",
        category.table_name()
    );
    match conn.query_row(&sql, params![game_id, name], |row| row.get::<_, Option<String>>(0)) {
        Ok(value) => Ok(value),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// The database version recorded in the `[Meta]` section, if any.
pub fn database_version(conn: &Connection) -> Result<Option<String>, OperationError> {
    let result = conn.query_row(
        "SELECT value FROM metadata WHERE key IN ('Meta.Version', 'version')
         ORDER BY key = 'Meta.Version' DESC LIMIT 1",
        [],
        |row| row.get::<_, Option<String>>(0),
    );
    match result {
        Ok(value) => Ok(value),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All regions, ordered by code.
pub fn list_regions(conn: &Connection) -> Result<Vec<Region>, OperationError> {
    let mut stmt = conn.prepare("SELECT id, code, name FROM regions ORDER BY code")?;
    let rows = stmt.query_map([], |row| {
        Ok(Region {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the game database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub games: i64,
    pub with_cartridge_code: i64,
    pub with_players: i64,
    pub with_rumble: i64,
    pub regions: i64,
    pub developers: i64,
    pub genres: i64,
    pub setting_descriptions: i64,
    pub metadata_entries: i64,
}

/// Get summary statistics for the database.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> Result<i64, OperationError> {
        conn.query_row(sql, [], |row| row.get(0))
            .map_err(Into::into)
    };

    Ok(CatalogStats {
        games: count("SELECT COUNT(*) FROM games")?,
        with_cartridge_code: count(
            "SELECT COUNT(*) FROM games WHERE cartridge_code IS NOT NULL AND cartridge_code != ''",
        )?,
        with_players: count("SELECT COUNT(*) FROM games WHERE players IS NOT NULL")?,
        with_rumble: count("SELECT COUNT(*) FROM games WHERE force_feedback = 1")?,
        regions: count("SELECT COUNT(*) FROM regions")?,
        developers: count("SELECT COUNT(*) FROM developers")?,
        genres: count("SELECT COUNT(*) FROM genres")?,
        setting_descriptions: count("SELECT COUNT(*) FROM setting_descriptions")?,
        metadata_entries: count("SELECT COUNT(*) FROM metadata")?,
    })
}
