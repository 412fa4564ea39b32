//! Data model types for the game database.
//!
//! These mirror the persistent schema: game records with their free-form
//! settings, namespaced metadata, and setting descriptions.

use std::collections::BTreeMap;

use crate::date::ReleaseDate;

// ── Game Record ─────────────────────────────────────────────────────────────

/// One game section from a database file, keyed by its ROM identifier.
///
/// Every field except `rom_id` is optional. Release date and year live
/// together in [`ReleaseDate`] so one is never present without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    /// Section header text, verbatim (e.g. `"8F1B2A5A-FC3E9E0E-C:45"`).
    pub rom_id: String,
    /// Region hint decomposed from a `-C:<code>` fragment of the identifier.
    pub cartridge_code: Option<String>,
    pub good_name: Option<String>,
    pub internal_name: Option<String>,
    pub status: Option<String>,
    /// Authoritative cartridge SKU (e.g. `"NUS-NSME-USA"`).
    pub product_id: Option<String>,
    pub developer: Option<String>,
    pub genre: Option<String>,
    pub release: Option<ReleaseDate>,
    /// Player count, always within 1..=4 when present.
    pub players: Option<u8>,
    /// Rumble support; `None` means unknown.
    pub force_feedback: Option<bool>,
    /// Unrecognized `key=value` lines.
    pub settings: BTreeMap<String, String>,
}

impl GameRecord {
    /// Create an empty record for an identifier, decomposing its cartridge code.
    pub fn new(rom_id: impl Into<String>) -> Self {
        let rom_id = rom_id.into();
        let cartridge_code = crate::identifier::cartridge_code(&rom_id).map(str::to_string);
        Self {
            rom_id,
            cartridge_code,
            ..Default::default()
        }
    }

    /// Display date string, if a release date was recognized.
    pub fn release_date(&self) -> Option<&str> {
        self.release.as_ref().map(|r| r.display.as_str())
    }

    /// Release year, if a release date was recognized.
    pub fn release_year(&self) -> Option<i32> {
        self.release.as_ref().map(|r| r.year)
    }

    /// Overlay a later occurrence of the same identifier onto this record.
    ///
    /// Fields present in `later` win; absent fields keep their current value.
    /// Settings merge key by key.
    pub fn merge_from(&mut self, later: GameRecord) {
        fn take<T>(slot: &mut Option<T>, incoming: Option<T>) {
            if incoming.is_some() {
                *slot = incoming;
            }
        }

        take(&mut self.cartridge_code, later.cartridge_code);
        take(&mut self.good_name, later.good_name);
        take(&mut self.internal_name, later.internal_name);
        take(&mut self.status, later.status);
        take(&mut self.product_id, later.product_id);
        take(&mut self.developer, later.developer);
        take(&mut self.genre, later.genre);
        take(&mut self.release, later.release);
        take(&mut self.players, later.players);
        take(&mut self.force_feedback, later.force_feedback);
        self.settings.extend(later.settings);
    }
}

// ── Metadata ────────────────────────────────────────────────────────────────

/// Flat `section.key → value` mapping collected from metadata sections.
///
/// Inserting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value under `<section>.<key>`.
    pub fn insert(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.entries
            .insert(format!("{section}.{key}"), value.into());
    }

    /// Look up a fully namespaced key (e.g. `"Meta.Version"`).
    pub fn get(&self, namespaced_key: &str) -> Option<&str> {
        self.entries.get(namespaced_key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another mapping into this one; `other` wins on conflicts.
    pub fn extend(&mut self, other: Metadata) {
        self.entries.extend(other.entries);
    }
}

// ── Setting Descriptions ────────────────────────────────────────────────────

/// Documentation for one per-game setting, keyed by (category, setting name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingDescription {
    pub category: String,
    pub setting_name: String,
    pub description: String,
    /// The raw `- value` block, one value per line.
    pub possible_values: String,
    /// The value tagged `(default)` in the possible values block.
    pub default_value: Option<String>,
}

/// Which settings table a database file's free-form settings belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingCategory {
    Core,
    Audio,
    Video,
}

impl SettingCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }

    /// Name of the SQLite table holding this category's settings.
    pub fn table_name(&self) -> &'static str {
        match self {
            Self::Core => "core_settings",
            Self::Audio => "audio_settings",
            Self::Video => "video_settings",
        }
    }
}

impl std::fmt::Display for SettingCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Region ──────────────────────────────────────────────────────────────────

/// A region row: the 2-character cartridge code and its human name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_decomposes_cartridge_code() {
        let record = GameRecord::new("8F1B2A5A-FC3E9E0E-C:45");
        assert_eq!(record.cartridge_code.as_deref(), Some("45"));
        assert!(record.good_name.is_none());
    }

    #[test]
    fn merge_keeps_fields_missing_from_later() {
        let mut first = GameRecord::new("ID");
        first.good_name = Some("First".to_string());
        first.players = Some(2);
        first.settings.insert("Counter Factor".into(), "2".into());

        let mut later = GameRecord::new("ID");
        later.good_name = Some("Second".to_string());
        later.settings.insert("Save Type".into(), "Eeprom 4KB".into());

        first.merge_from(later);
        assert_eq!(first.good_name.as_deref(), Some("Second"));
        assert_eq!(first.players, Some(2));
        assert_eq!(first.settings.len(), 2);
    }

    #[test]
    fn metadata_last_write_wins() {
        let mut meta = Metadata::new();
        meta.insert("Meta", "Version", "1.0");
        meta.insert("Meta", "Version", "2.0");
        assert_eq!(meta.get("Meta.Version"), Some("2.0"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn setting_category_tables() {
        assert_eq!(SettingCategory::Core.table_name(), "core_settings");
        assert_eq!(SettingCategory::Video.table_name(), "video_settings");
    }
}
