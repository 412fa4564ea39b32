//! Section tokenizers for the two database dialects.
//!
//! Dialect A (settings databases) is walked line by line: any trimmed line of
//! the form `[key]` opens a section, and a reserved set of section names
//! holds metadata instead of games. Dialect B (the details database) is split
//! wholesale on header lines at column 0, and only `[Meta]` sections are
//! treated as metadata.
//!
//! Tokenizing never fails. Malformed headers stay inside the preceding
//! section's text, so rendering the document always reproduces the input.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use romdb_catalog::{GameRecord, Metadata};

use crate::document::{RdbDocument, Section, SectionKind};
use crate::error::{RdbError, read_text};
use crate::extract::{extract_block_fields, extract_line_fields};

/// Section names that hold metadata in dialect A.
pub const METADATA_SECTIONS: &[&str] = &["Meta", "Rom Status", "Microcode Identifiers", "ucode"];

/// The metadata section recognized by dialect B.
pub const META_SECTION: &str = "Meta";

static BLOCK_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]\r\n]+)\]").expect("static pattern"));

/// Which grammar a file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Line-walked settings databases (core, audio, video).
    Line,
    /// Block-split details database.
    Block,
}

impl Dialect {
    pub fn tokenizer(&self) -> &'static dyn Tokenizer {
        match self {
            Self::Line => &LineTokenizer,
            Self::Block => &BlockTokenizer,
        }
    }
}

/// A tokenizing strategy for one dialect.
pub trait Tokenizer {
    /// Split text into sections and collect metadata.
    fn tokenize(&self, text: &str) -> RdbDocument;

    /// Extract the typed record for one game section.
    fn extract(&self, section: &Section) -> GameRecord;
}

/// Dialect A: explicit line-by-line walker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTokenizer;

impl Tokenizer for LineTokenizer {
    fn tokenize(&self, text: &str) -> RdbDocument {
        let mut doc = split_sections(text, line_header, |key| {
            if METADATA_SECTIONS.contains(&key) {
                SectionKind::Metadata
            } else {
                SectionKind::Game
            }
        });
        doc.metadata = collect_metadata(&doc);
        doc
    }

    fn extract(&self, section: &Section) -> GameRecord {
        extract_line_fields(&section.key, section.body())
    }
}

/// Dialect B: bulk split on header lines, fields found by search.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockTokenizer;

impl Tokenizer for BlockTokenizer {
    fn tokenize(&self, text: &str) -> RdbDocument {
        let mut doc = split_sections(text, block_header, |key| {
            if key == META_SECTION {
                SectionKind::Metadata
            } else {
                SectionKind::Game
            }
        });
        doc.metadata = collect_metadata(&doc);
        doc
    }

    fn extract(&self, section: &Section) -> GameRecord {
        extract_block_fields(&section.key, &section.text)
    }
}

/// Namespaced `key=value` entries from every metadata section, in order.
/// A key repeated in a later section replaces the earlier value.
fn collect_metadata(doc: &RdbDocument) -> Metadata {
    let mut metadata = Metadata::new();
    for section in doc.sections.iter().filter(|s| s.kind == SectionKind::Metadata) {
        for line in section.body().lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('[') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                metadata.insert(&section.key, key.trim(), value.trim());
            }
        }
    }
    metadata
}

/// Header key for dialect A: a trimmed line starting with `[` and holding a `]`.
fn line_header(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('[')?;
    let end = inner.find(']')?;
    let key = &inner[..end];
    if key.is_empty() { None } else { Some(key) }
}

/// Header key for dialect B: `[key]` starting at column 0.
fn block_header(line: &str) -> Option<&str> {
    BLOCK_HEADER
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Partition text into a preamble and sections without dropping a byte.
fn split_sections(
    text: &str,
    header: impl Fn(&str) -> Option<&str>,
    classify: impl Fn(&str) -> SectionKind,
) -> RdbDocument {
    let mut doc = RdbDocument::default();
    let mut current: Option<Section> = None;

    for line in text.split_inclusive('\n') {
        if let Some(key) = header(line) {
            if let Some(done) = current.take() {
                doc.sections.push(done);
            }
            current = Some(Section {
                key: key.to_string(),
                index: doc.sections.len(),
                kind: classify(key),
                text: line.to_string(),
            });
            continue;
        }

        match current.as_mut() {
            Some(section) => section.text.push_str(line),
            None => {
                if line.trim_start().starts_with('[') {
                    log::debug!("Skipping malformed section header {:?}", line.trim());
                }
                doc.preamble.push_str(line);
            }
        }
    }

    if let Some(done) = current {
        doc.sections.push(done);
    }
    doc
}

/// A tokenized file together with its extracted game records.
#[derive(Debug, Clone)]
pub struct ParsedRdb {
    pub document: RdbDocument,
    /// One record per distinct identifier, in first-seen order.
    pub records: Vec<GameRecord>,
}

impl ParsedRdb {
    pub fn metadata(&self) -> &Metadata {
        &self.document.metadata
    }
}

/// Tokenize and extract a database file's text.
///
/// A repeated section key is folded into the first record with that key;
/// later values win field by field.
pub fn parse_rdb(text: &str, dialect: Dialect) -> ParsedRdb {
    let tokenizer = dialect.tokenizer();
    let document = tokenizer.tokenize(text);

    let mut records: Vec<GameRecord> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    for section in document.game_sections() {
        let record = tokenizer.extract(section);
        match by_id.get(&record.rom_id) {
            Some(&i) => {
                log::debug!("Duplicate section [{}] merged", record.rom_id);
                records[i].merge_from(record);
            }
            None => {
                by_id.insert(record.rom_id.clone(), records.len());
                records.push(record);
            }
        }
    }

    ParsedRdb { document, records }
}

/// Read and parse a database file.
pub fn parse_rdb_file(path: &Path, dialect: Dialect) -> Result<ParsedRdb, RdbError> {
    let text = read_text(path)?;
    Ok(parse_rdb(&text, dialect))
}

#[cfg(test)]
#[path = "tests/tokenizer_tests.rs"]
mod tests;
