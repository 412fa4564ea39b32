//! Write operations: entity resolution and upserts.

use romdb_catalog::{region_name_for_code, GameRecord, SettingCategory, SettingDescription};
use rusqlite::{params, Connection, ToSql};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

/// Run a single-column id lookup, mapping "no rows" to `None`.
pub(crate) fn query_id(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Option<i64>, OperationError> {
    match conn.query_row(sql, params, |row| row.get::<_, i64>(0)) {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Trimmed, non-empty input, or `None`.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ── Entity Resolution ───────────────────────────────────────────────────────

/// Resolve a region by cartridge code, creating it when unseen.
///
/// Unknown codes are stored as `Unknown Region (<code>)`. Empty input
/// resolves to no region.
pub fn get_or_create_region(
    conn: &Connection,
    code: Option<&str>,
) -> Result<Option<i64>, OperationError> {
    let Some(code) = present(code) else {
        return Ok(None);
    };

    if let Some(id) = query_id(conn, "SELECT id FROM regions WHERE code = ?1", params![code])? {
        return Ok(Some(id));
    }

    let name = region_name_for_code(code);
    log::warn!("Unrecognized region code {code}, storing as \"{name}\"");
    conn.execute(
        "INSERT INTO regions (code, name) VALUES (?1, ?2)",
        params![code, name],
    )?;
    Ok(Some(conn.last_insert_rowid()))
}

/// Resolve a developer by exact name, creating it when unseen.
pub fn get_or_create_developer(
    conn: &Connection,
    name: Option<&str>,
) -> Result<Option<i64>, OperationError> {
    get_or_create_named(conn, "developers", name)
}

/// Resolve a genre by exact name, creating it when unseen.
pub fn get_or_create_genre(
    conn: &Connection,
    name: Option<&str>,
) -> Result<Option<i64>, OperationError> {
    get_or_create_named(conn, "genres", name)
}

fn get_or_create_named(
    conn: &Connection,
    table: &'static str,
    name: Option<&str>,
) -> Result<Option<i64>, OperationError> {
    let Some(name) = present(name) else {
        return Ok(None);
    };

    let select = format!("SELECT id FROM {table} WHERE name = ?1");
    if let Some(id) = query_id(conn, &select, params![name])? {
        return Ok(Some(id));
    }

    conn.execute(
        &format!("INSERT INTO {table} (name) VALUES (?1)"),
        params![name],
    )?;
    Ok(Some(conn.last_insert_rowid()))
}

/// Look up a seeded cartridge color. Colors are never created.
pub fn find_cartridge_color(
    conn: &Connection,
    name: Option<&str>,
) -> Result<Option<i64>, OperationError> {
    match present(name) {
        Some(name) => query_id(conn, "SELECT id FROM cartridge_colors WHERE name = ?1", params![name]),
        None => Ok(None),
    }
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Outcome of [`upsert_game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameUpsert {
    pub id: i64,
    /// `false` when the row already existed and was merged into.
    pub created: bool,
}

/// Find a game's row id by ROM identifier.
pub fn find_game_id(conn: &Connection, rom_id: &str) -> Result<Option<i64>, OperationError> {
    query_id(conn, "SELECT id FROM games WHERE rom_id = ?1", params![rom_id])
}

/// Insert a game, or merge it into the existing row for its ROM identifier.
///
/// Merging fills only columns that are currently NULL; stored values are
/// never overwritten. The region comes from the cartridge code decomposed
/// from the identifier.
///
/// The `cartridge_code` column holds the product identifier when known and
/// the decomposed code otherwise. A product identifier arriving later
/// replaces a stored decomposed code, but never another product identifier.
pub fn upsert_game(conn: &Connection, record: &GameRecord) -> Result<GameUpsert, OperationError> {
    let region_id = get_or_create_region(conn, record.cartridge_code.as_deref())?;
    let developer_id = get_or_create_developer(conn, record.developer.as_deref())?;
    let genre_id = get_or_create_genre(conn, record.genre.as_deref())?;

    let product_id = present(record.product_id.as_deref());
    let decomposed_code = present(record.cartridge_code.as_deref());
    let release_date = record.release_date();
    let release_year = record.release_year();
    let values = params![
        record.rom_id,
        record.good_name,
        record.internal_name,
        record.status,
        region_id,
        product_id,
        developer_id,
        genre_id,
        release_date,
        release_year,
        record.players,
        record.force_feedback,
        decomposed_code,
    ];

    if let Some(id) = find_game_id(conn, &record.rom_id)? {
        conn.execute(
            "UPDATE games SET
                 good_name = COALESCE(good_name, ?2),
                 internal_name = COALESCE(internal_name, ?3),
                 status = COALESCE(status, ?4),
                 region_id = COALESCE(region_id, ?5),
                 cartridge_code = CASE
                     WHEN ?6 IS NOT NULL AND (cartridge_code IS NULL OR cartridge_code = ?13) THEN ?6
                     ELSE COALESCE(cartridge_code, ?13)
                 END,
                 developer_id = COALESCE(developer_id, ?7),
                 genre_id = COALESCE(genre_id, ?8),
                 release_date = COALESCE(release_date, ?9),
                 release_year = COALESCE(release_year, ?10),
                 players = COALESCE(players, ?11),
                 force_feedback = COALESCE(force_feedback, ?12)
             WHERE rom_id = ?1",
            values,
        )?;
        return Ok(GameUpsert { id, created: false });
    }

    conn.execute(
        "INSERT INTO games (rom_id, good_name, internal_name, status, region_id, cartridge_code,
                            developer_id, genre_id, release_date, release_year, players, force_feedback)
         VALUES (?1, ?2, ?3, ?4, ?5, COALESCE(?6, ?13), ?7, ?8, ?9, ?10, ?11, ?12)",
        values,
    )?;
    Ok(GameUpsert {
        id: conn.last_insert_rowid(),
        created: true,
    })
}

/// Assign a seeded cartridge color to a game.
///
/// Returns `false` without writing when the color is not one of the seeds.
pub fn set_game_cartridge_color(
    conn: &Connection,
    game_id: i64,
    color: &str,
) -> Result<bool, OperationError> {
    let Some(color_id) = find_cartridge_color(conn, Some(color))? else {
        log::debug!("Unknown cartridge color {color:?}");
        return Ok(false);
    };

    let changed = conn.execute(
        "UPDATE games SET cartridge_color_id = ?2 WHERE id = ?1",
        params![game_id, color_id],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "game".to_string(),
            id: game_id.to_string(),
        });
    }
    Ok(true)
}

// ── Settings, Metadata, Descriptions ────────────────────────────────────────

/// Store one free-form setting in its category's table. Last write wins.
pub fn upsert_setting(
    conn: &Connection,
    game_id: i64,
    category: SettingCategory,
    name: &str,
    value: &str,
) -> Result<(), OperationError> {
    let sql = format!(
        "INSERT INTO {} (game_id, setting_name, setting_value)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(game_id, setting_name) DO UPDATE SET
             setting_value = excluded.setting_value",
        category.table_name()
    );
    conn.execute(&sql, params![game_id, name, value])?;
    Ok(())
}

/// Store a namespaced metadata value. Last write wins.
pub fn upsert_metadata(conn: &Connection, key: &str, value: &str) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO metadata (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// Store a setting description, replacing any earlier one for the same
/// (category, setting name).
pub fn upsert_description(
    conn: &Connection,
    description: &SettingDescription,
) -> Result<(), OperationError> {
    conn.execute(
        "INSERT INTO setting_descriptions (category, setting_name, description, possible_values, default_value)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(category, setting_name) DO UPDATE SET
             description = excluded.description,
             possible_values = excluded.possible_values,
             default_value = excluded.default_value",
        params![
            description.category,
            description.setting_name,
            description.description,
            description.possible_values,
            description.default_value,
        ],
    )?;
    Ok(())
}
