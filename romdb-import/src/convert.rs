//! Load database files into the SQLite store.
//!
//! Sources are loaded in a fixed order: core settings, details, audio,
//! video, then setting descriptions. A game seen in an earlier source is
//! only filled in by later ones, never overwritten. Each source, games and
//! metadata together, is written in its own transaction.

use romdb_catalog::{GameRecord, Metadata, SettingCategory, SettingDescription};
use romdb_db::operations::{self, OperationError};
use romdb_rdb::{Dialect, parse_rdb, parse_setting_descriptions};
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// One of the game database files a conversion can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSource {
    Core,
    Details,
    Audio,
    Video,
}

impl GameSource {
    pub fn dialect(&self) -> Dialect {
        match self {
            Self::Details => Dialect::Block,
            Self::Core | Self::Audio | Self::Video => Dialect::Line,
        }
    }

    /// Which settings table this source's free-form keys are stored in.
    pub fn settings_category(&self) -> SettingCategory {
        match self {
            Self::Core | Self::Details => SettingCategory::Core,
            Self::Audio => SettingCategory::Audio,
            Self::Video => SettingCategory::Video,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Core => "core database",
            Self::Details => "details database",
            Self::Audio => "audio database",
            Self::Video => "video database",
        }
    }
}

/// Text of every input to a conversion. Only `core` is required.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertSources<'a> {
    pub core: &'a str,
    pub details: Option<&'a str>,
    pub audio: Option<&'a str>,
    pub video: Option<&'a str>,
    pub descriptions: Option<&'a str>,
}

/// Statistics from importing one set of game records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub games_created: u64,
    pub games_merged: u64,
    pub settings_written: u64,
}

impl ImportStats {
    fn add(&mut self, other: &ImportStats) {
        self.games_created += other.games_created;
        self.games_merged += other.games_merged;
        self.settings_written += other.settings_written;
    }
}

/// What a whole conversion wrote.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub games: ImportStats,
    pub metadata_entries: u64,
    pub descriptions: u64,
    /// Sources that were loaded, in load order.
    pub sources_loaded: Vec<GameSource>,
}

/// Import game records, routing their free-form settings to `category`.
///
/// Writes through `conn` as given; the caller owns the transaction.
pub fn import_games(
    conn: &Connection,
    records: &[GameRecord],
    category: SettingCategory,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::default();

    for (i, record) in records.iter().enumerate() {
        let game = operations::upsert_game(conn, record)?;
        if game.created {
            stats.games_created += 1;
        } else {
            stats.games_merged += 1;
        }

        for (name, value) in &record.settings {
            operations::upsert_setting(conn, game.id, category, name, value)?;
            stats.settings_written += 1;
        }

        if let Some(p) = progress {
            p.on_game(i + 1, records.len(), &record.rom_id);
        }
    }

    Ok(stats)
}

/// Store metadata entries. Later values for a key replace earlier ones.
///
/// Writes through `conn` as given; the caller owns the transaction.
pub fn import_metadata(conn: &Connection, metadata: &Metadata) -> Result<u64, ImportError> {
    for (key, value) in metadata.iter() {
        operations::upsert_metadata(conn, key, value)?;
    }
    Ok(metadata.len() as u64)
}

/// Store setting descriptions. A repeated (category, name) keeps the last one.
pub fn import_descriptions(
    conn: &Connection,
    descriptions: &[SettingDescription],
) -> Result<u64, ImportError> {
    let tx = conn.unchecked_transaction()?;
    for description in descriptions {
        operations::upsert_description(&tx, description)?;
    }
    tx.commit()?;
    Ok(descriptions.len() as u64)
}

/// Parse and load every supplied source into the store.
pub fn convert(
    conn: &Connection,
    sources: &ConvertSources<'_>,
    progress: Option<&dyn ImportProgress>,
) -> Result<ConvertReport, ImportError> {
    let mut report = ConvertReport::default();

    let game_sources = [
        (GameSource::Core, Some(sources.core)),
        (GameSource::Details, sources.details),
        (GameSource::Audio, sources.audio),
        (GameSource::Video, sources.video),
    ];

    for (source, text) in game_sources {
        let Some(text) = text else {
            if let Some(p) = progress {
                p.on_skipped(source.label());
            }
            continue;
        };

        if let Some(p) = progress {
            p.on_phase(&format!("Loading {}", source.label()));
        }
        let parsed = parse_rdb(text, source.dialect());
        log::debug!(
            "{}: {} games, {} metadata entries",
            source.label(),
            parsed.records.len(),
            parsed.metadata().len()
        );

        let tx = conn.unchecked_transaction()?;
        let stats = import_games(&tx, &parsed.records, source.settings_category(), progress)?;
        let metadata_entries = import_metadata(&tx, parsed.metadata())?;
        tx.commit()?;

        report.games.add(&stats);
        report.metadata_entries += metadata_entries;
        report.sources_loaded.push(source);
    }

    match sources.descriptions {
        Some(text) => {
            if let Some(p) = progress {
                p.on_phase("Loading setting descriptions");
            }
            let descriptions = parse_setting_descriptions(text);
            report.descriptions = import_descriptions(conn, &descriptions)?;
        }
        None => {
            if let Some(p) = progress {
                p.on_skipped("setting descriptions");
            }
        }
    }

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Loaded {} new games ({} merged), {} settings, {} metadata entries, {} descriptions",
            report.games.games_created,
            report.games.games_merged,
            report.games.settings_written,
            report.metadata_entries,
            report.descriptions
        ));
    }

    Ok(report)
}
