//! SQLite schema creation, seeding and versioning.

use romdb_catalog::REGION_SEEDS;
use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Database was written by a newer version: expected schema {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 1;

/// Cartridge shell colors known to the database. Colors are never created
/// on demand.
pub const CARTRIDGE_COLOR_SEEDS: &[&str] =
    &["Green", "Red", "Yellow", "Black", "Gray", "Gold", "Gold/Silver"];

/// Create all tables and indexes if they don't exist, then seed reference data.
///
/// This is idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    seed_reference_data(conn)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a game database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Bring an older schema up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    // No migrations yet; re-running the idempotent schema fills any gaps.
    conn.execute_batch(SCHEMA_SQL)?;
    seed_reference_data(conn)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

fn seed_reference_data(conn: &Connection) -> Result<(), SchemaError> {
    let mut region = conn.prepare("INSERT OR IGNORE INTO regions (code, name) VALUES (?1, ?2)")?;
    for (code, name) in REGION_SEEDS {
        region.execute(params![code, name])?;
    }

    let mut color = conn.prepare("INSERT OR IGNORE INTO cartridge_colors (name) VALUES (?1)")?;
    for name in CARTRIDGE_COLOR_SEEDS {
        color.execute(params![name])?;
    }
    Ok(())
}

const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Reference entities
CREATE TABLE IF NOT EXISTS regions (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS developers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS genres (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS cartridge_colors (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);

-- Games, keyed by ROM identifier
CREATE TABLE IF NOT EXISTS games (
    id INTEGER PRIMARY KEY,
    rom_id TEXT NOT NULL UNIQUE,
    good_name TEXT,
    internal_name TEXT,
    status TEXT,
    region_id INTEGER REFERENCES regions(id),
    cartridge_code TEXT,
    developer_id INTEGER REFERENCES developers(id),
    genre_id INTEGER REFERENCES genres(id),
    release_date TEXT,
    release_year INTEGER,
    players INTEGER,
    force_feedback BOOLEAN,
    cartridge_color_id INTEGER REFERENCES cartridge_colors(id)
);
CREATE INDEX IF NOT EXISTS idx_games_good_name ON games(good_name);

-- Per-game settings, one table per category
CREATE TABLE IF NOT EXISTS core_settings (
    id INTEGER PRIMARY KEY,
    game_id INTEGER NOT NULL REFERENCES games(id),
    setting_name TEXT NOT NULL,
    setting_value TEXT,
    UNIQUE(game_id, setting_name)
);

CREATE TABLE IF NOT EXISTS audio_settings (
    id INTEGER PRIMARY KEY,
    game_id INTEGER NOT NULL REFERENCES games(id),
    setting_name TEXT NOT NULL,
    setting_value TEXT,
    UNIQUE(game_id, setting_name)
);

CREATE TABLE IF NOT EXISTS video_settings (
    id INTEGER PRIMARY KEY,
    game_id INTEGER NOT NULL REFERENCES games(id),
    setting_name TEXT NOT NULL,
    setting_value TEXT,
    UNIQUE(game_id, setting_name)
);

-- Setting documentation
CREATE TABLE IF NOT EXISTS setting_descriptions (
    id INTEGER PRIMARY KEY,
    category TEXT NOT NULL,
    setting_name TEXT NOT NULL,
    description TEXT,
    possible_values TEXT,
    default_value TEXT,
    UNIQUE(category, setting_name)
);

-- Flat section.key metadata
CREATE TABLE IF NOT EXISTS metadata (
    id INTEGER PRIMARY KEY,
    key TEXT NOT NULL UNIQUE,
    value TEXT
);
"#;
