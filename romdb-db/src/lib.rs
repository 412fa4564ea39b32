//! SQLite persistence layer for the game database.
//!
//! Provides schema creation, get-or-create entity resolution, game upserts
//! and read queries, backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    find_cartridge_color, find_game_id, get_or_create_developer, get_or_create_genre,
    get_or_create_region, set_game_cartridge_color, upsert_description, upsert_game,
    upsert_metadata, upsert_setting, GameUpsert, OperationError,
};
pub use queries::{
    catalog_stats, database_version, find_game_by_crc, find_game_by_rom_id, game_setting,
    list_regions, CatalogStats, GameRow,
};
pub use schema::{open_database, open_memory, SchemaError, CARTRIDGE_COLOR_SEEDS};
