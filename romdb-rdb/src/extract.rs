//! Field extraction from game section bodies.
//!
//! Both dialects feed raw `(field, value)` observations into the same
//! [`RecordBuilder`], so the typed result is identical however the values
//! were found.

use std::sync::LazyLock;

use regex::Regex;
use romdb_catalog::{GameRecord, parse_release_date};

/// Keys with a dedicated [`GameRecord`] field. Everything else is a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    GoodName,
    InternalName,
    Status,
    ProductId,
    Developer,
    Genre,
    ReleaseDate,
    Players,
    ForceFeedback,
    Rumble,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::GoodName,
        Field::InternalName,
        Field::Status,
        Field::ProductId,
        Field::Developer,
        Field::Genre,
        Field::ReleaseDate,
        Field::Players,
        Field::ForceFeedback,
        Field::Rumble,
    ];

    /// The exact key as written in the file.
    pub fn key(&self) -> &'static str {
        match self {
            Self::GoodName => "Good Name",
            Self::InternalName => "Internal Name",
            Self::Status => "Status",
            Self::ProductId => "ProductID",
            Self::Developer => "Developer",
            Self::Genre => "Genre",
            Self::ReleaseDate => "ReleaseDate",
            Self::Players => "Players",
            Self::ForceFeedback => "ForceFeedback",
            Self::Rumble => "Rumble",
        }
    }

    /// Case-sensitive key lookup.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// Accumulates field values for one section into a [`GameRecord`].
pub struct RecordBuilder {
    record: GameRecord,
    force_feedback: Option<bool>,
    rumble: Option<bool>,
}

impl RecordBuilder {
    pub fn new(rom_id: &str) -> Self {
        Self {
            record: GameRecord::new(rom_id),
            force_feedback: None,
            rumble: None,
        }
    }

    /// Apply one recognized value. Values are trimmed; empty values and
    /// values that fail validation are ignored.
    pub fn set(&mut self, field: Field, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        let record = &mut self.record;
        match field {
            Field::GoodName => record.good_name = Some(value.to_string()),
            Field::InternalName => record.internal_name = Some(value.to_string()),
            Field::Status => record.status = Some(value.to_string()),
            Field::ProductId => record.product_id = Some(value.to_string()),
            Field::Developer => record.developer = Some(value.to_string()),
            Field::Genre => record.genre = Some(value.to_string()),
            Field::ReleaseDate => match parse_release_date(value) {
                Some(date) => {
                    if !date.is_full_date() {
                        log::debug!("{}: keeping partial date {:?}", record.rom_id, value);
                    }
                    record.release = Some(date);
                }
                None => log::debug!(
                    "{}: no release year in {:?}",
                    record.rom_id,
                    value
                ),
            },
            Field::Players => match parse_players(value) {
                Some(n) => record.players = Some(n),
                None => log::debug!(
                    "{}: dropping player count {:?}",
                    record.rom_id,
                    value
                ),
            },
            Field::ForceFeedback => self.force_feedback = Some(is_truthy(value)),
            Field::Rumble => self.rumble = Some(is_truthy(value)),
        }
    }

    /// Store an unrecognized key verbatim.
    pub fn set_setting(&mut self, key: &str, value: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        self.record
            .settings
            .insert(key.to_string(), value.trim().to_string());
    }

    /// Route a `key=value` pair to a field or the settings map.
    pub fn set_pair(&mut self, key: &str, value: &str) {
        match Field::from_key(key.trim()) {
            Some(field) => self.set(field, value),
            None => self.set_setting(key, value),
        }
    }

    /// Finish the record. `ForceFeedback` takes precedence over `Rumble`.
    pub fn finish(mut self) -> GameRecord {
        self.record.force_feedback = self.force_feedback.or(self.rumble);
        self.record
    }
}

/// Parse a player count, accepting only 1 through 4.
pub fn parse_players(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=4).contains(n))
}

/// Case-insensitive `yes` / `true` / `1`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

/// Walk a section body line by line (dialect A).
///
/// Comments, blank lines, stray header lines and lines without `=` are
/// skipped.
pub fn extract_line_fields(rom_id: &str, body: &str) -> GameRecord {
    let mut builder = RecordBuilder::new(rom_id);

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('[') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => builder.set_pair(key, value),
            None => log::debug!("{rom_id}: skipping malformed line {line:?}"),
        }
    }

    builder.finish()
}

static FIELD_PATTERNS: LazyLock<Vec<(Field, Regex)>> = LazyLock::new(|| {
    Field::ALL
        .into_iter()
        .map(|field| {
            let pattern = format!(r"(?m)^[ \t]*{}[ \t]*=(.*)$", regex::escape(field.key()));
            (field, Regex::new(&pattern).expect("static pattern"))
        })
        .collect()
});

static SETTING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*([^=\[/\r\n][^=\r\n]*)=(.*)$").expect("static pattern")
});

/// Search a whole section block for each field (dialect B).
///
/// Each recognized key is located by its own pattern anywhere in the block;
/// a second pass collects every remaining `key=value` line as a setting.
pub fn extract_block_fields(rom_id: &str, block: &str) -> GameRecord {
    let mut builder = RecordBuilder::new(rom_id);

    for (field, pattern) in FIELD_PATTERNS.iter() {
        for caps in pattern.captures_iter(block) {
            if let Some(value) = caps.get(1) {
                builder.set(*field, value.as_str());
            }
        }
    }

    for caps in SETTING_LINE.captures_iter(block) {
        let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if Field::from_key(key.as_str().trim()).is_none() {
            builder.set_setting(key.as_str(), value.as_str());
        }
    }

    builder.finish()
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
