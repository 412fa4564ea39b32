//! Product identifier reconciliation against an authoritative code list.
//!
//! Each game section of the primary file is matched to a code list entry by
//! normalized title. Where the code list proposes a different product
//! identifier, the proposal is checked against the section's region tag and
//! cartridge code before being written into the section text. Everything is
//! in memory; the caller decides whether and where to write the result.

use std::collections::{HashMap, HashSet};

use romdb_catalog::{
    GameRecord, ValidationMismatch, normalize_title, region_tag_from_title, validate_product_id,
};
use romdb_rdb::{CodeEntry, Dialect, RdbDocument, Tokenizer};

/// The key rewritten in game sections.
const PRODUCT_ID_KEY: &str = "ProductID";

/// How a record fared in reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchClass {
    /// Matched; the code list agrees or has nothing to offer.
    Unchanged,
    /// Matched; the code list proposes a different product identifier.
    Updated,
    /// Primary record with no code list entry.
    PrimaryOnly,
    /// Code list entry with no primary record.
    SecondaryOnly,
}

/// One classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileMatch {
    pub class: MatchClass,
    /// Position of the primary section; `None` for [`MatchClass::SecondaryOnly`].
    pub section_index: Option<usize>,
    pub rom_id: Option<String>,
    /// The primary record's title, or the code list title for secondary-only.
    pub title: String,
    pub current_product_id: Option<String>,
    /// The code list's product identifier, when an entry matched.
    pub proposed_product_id: Option<String>,
}

/// An update written into a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateApplied {
    pub section_index: usize,
    pub rom_id: String,
    pub title: String,
    pub old_product_id: Option<String>,
    pub new_product_id: String,
}

/// An update rejected by region validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUpdate {
    pub section_index: usize,
    pub rom_id: String,
    pub title: String,
    pub proposed_product_id: String,
    pub reason: ValidationMismatch,
}

impl SkippedUpdate {
    /// One-line warning text for reports.
    pub fn warning(&self) -> String {
        format!(
            "Skipped {} for {} ({}): {}",
            self.proposed_product_id, self.title, self.rom_id, self.reason
        )
    }
}

/// Result of a full reconciliation run.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub matches: Vec<ReconcileMatch>,
    pub applied: Vec<UpdateApplied>,
    pub skipped: Vec<SkippedUpdate>,
    /// The primary file text with accepted updates applied.
    pub output: String,
}

impl Reconciliation {
    pub fn count(&self, class: MatchClass) -> usize {
        self.matches.iter().filter(|m| m.class == class).count()
    }

    /// Number of primary records considered.
    pub fn primary_total(&self) -> usize {
        self.matches.iter().filter(|m| m.section_index.is_some()).count()
    }

    /// Matches of one class, in order.
    pub fn of_class(&self, class: MatchClass) -> impl Iterator<Item = &ReconcileMatch> {
        self.matches.iter().filter(move |m| m.class == class)
    }
}

/// Extract one record per game section, paired with its position index.
///
/// Unlike a plain parse, repeated identifiers are kept apart: every section
/// is reconciled on its own.
pub fn primary_records(document: &RdbDocument, dialect: Dialect) -> Vec<(usize, GameRecord)> {
    let tokenizer = dialect.tokenizer();
    document
        .game_sections()
        .map(|section| (section.index, tokenizer.extract(section)))
        .collect()
}

/// Classify every primary record and every unmatched code list entry.
///
/// Primary results come first in section order, followed by secondary-only
/// entries in code list order.
pub fn classify(primary: &[(usize, GameRecord)], codes: &[CodeEntry]) -> Vec<ReconcileMatch> {
    let mut lookup: HashMap<String, &CodeEntry> = HashMap::new();
    for entry in codes {
        let key = normalize_title(&entry.title);
        if !key.is_empty() {
            lookup.insert(key, entry);
        }
    }

    let mut matches = Vec::with_capacity(primary.len());
    let mut primary_titles = HashSet::new();

    for (index, record) in primary {
        let title = record.good_name.clone().unwrap_or_default();
        let key = normalize_title(&title);
        let candidate = if key.is_empty() { None } else { lookup.get(&key) };

        let class = match candidate {
            None => MatchClass::PrimaryOnly,
            Some(entry) => {
                let proposed = entry.product_id.trim();
                let current = record.product_id.as_deref().map(str::trim);
                if proposed.is_empty() || current == Some(proposed) {
                    MatchClass::Unchanged
                } else {
                    MatchClass::Updated
                }
            }
        };

        if !key.is_empty() {
            primary_titles.insert(key);
        }
        matches.push(ReconcileMatch {
            class,
            section_index: Some(*index),
            rom_id: Some(record.rom_id.clone()),
            title,
            current_product_id: record.product_id.clone(),
            proposed_product_id: candidate.map(|e| e.product_id.trim().to_string()),
        });
    }

    let mut reported = HashSet::new();
    for entry in codes {
        let key = normalize_title(&entry.title);
        if key.is_empty() || primary_titles.contains(&key) || !reported.insert(key.clone()) {
            continue;
        }
        let winner = lookup.get(&key).copied().unwrap_or(entry);
        matches.push(ReconcileMatch {
            class: MatchClass::SecondaryOnly,
            section_index: None,
            rom_id: None,
            title: winner.title.clone(),
            current_product_id: None,
            proposed_product_id: Some(winner.product_id.clone()),
        });
    }

    matches
}

/// Validate and write every [`MatchClass::Updated`] proposal into `document`.
///
/// A proposal that contradicts the record's region tag or cartridge code is
/// skipped with a warning; its section is left untouched.
pub fn apply_updates(
    document: &mut RdbDocument,
    primary: &[(usize, GameRecord)],
    matches: &[ReconcileMatch],
) -> (Vec<UpdateApplied>, Vec<SkippedUpdate>) {
    let records: HashMap<usize, &GameRecord> = primary.iter().map(|(i, r)| (*i, r)).collect();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for m in matches.iter().filter(|m| m.class == MatchClass::Updated) {
        let (Some(index), Some(proposed)) = (m.section_index, m.proposed_product_id.as_deref())
        else {
            continue;
        };
        let Some(record) = records.get(&index) else {
            continue;
        };

        let region = region_tag_from_title(&m.title);
        if let Err(reason) = validate_product_id(record.cartridge_code.as_deref(), region, proposed) {
            log::warn!("{}: {}; keeping {:?}", record.rom_id, reason, record.product_id);
            skipped.push(SkippedUpdate {
                section_index: index,
                rom_id: record.rom_id.clone(),
                title: m.title.clone(),
                proposed_product_id: proposed.to_string(),
                reason,
            });
            continue;
        }

        let Some(section) = document.section_mut(index) else {
            continue;
        };
        section.upsert_key(PRODUCT_ID_KEY, proposed);
        log::debug!("{}: ProductID {:?} -> {}", record.rom_id, record.product_id, proposed);
        applied.push(UpdateApplied {
            section_index: index,
            rom_id: record.rom_id.clone(),
            title: m.title.clone(),
            old_product_id: record.product_id.clone(),
            new_product_id: proposed.to_string(),
        });
    }

    (applied, skipped)
}

/// Reconcile a primary file's text against a code list.
///
/// Pure with respect to the filesystem: the merged text is returned in
/// [`Reconciliation::output`]. With no applicable updates the output is
/// byte-identical to `text`.
pub fn reconcile(text: &str, dialect: Dialect, codes: &[CodeEntry]) -> Reconciliation {
    let mut document = dialect.tokenizer().tokenize(text);
    let primary = primary_records(&document, dialect);
    let matches = classify(&primary, codes);
    let (applied, skipped) = apply_updates(&mut document, &primary, &matches);

    log::info!(
        "{} records: {} updated, {} unchanged, {} unmatched, {} skipped",
        primary.len(),
        applied.len(),
        matches.iter().filter(|m| m.class == MatchClass::Unchanged).count(),
        matches.iter().filter(|m| m.class == MatchClass::PrimaryOnly).count(),
        skipped.len()
    );

    Reconciliation {
        matches,
        applied,
        skipped,
        output: document.render(),
    }
}
