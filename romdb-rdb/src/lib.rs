//! Parsers for the emulator's section-structured game database files.
//!
//! The same `[section]` / `key=value` grammar is read in two dialects:
//! a line walker for the settings databases and a block splitter for the
//! details database. Both produce an [`RdbDocument`] that renders back to the
//! exact input text, so edits can be written without disturbing anything else.

pub mod codes;
pub mod document;
pub mod error;
pub mod extract;
pub mod info;
pub mod tokenizer;

pub use codes::{CodeEntry, parse_codes, parse_codes_file};
pub use document::{RdbDocument, Section, SectionKind};
pub use error::{RdbError, read_text};
pub use info::{parse_setting_descriptions, parse_setting_descriptions_file};
pub use tokenizer::{BlockTokenizer, Dialect, LineTokenizer, ParsedRdb, Tokenizer, parse_rdb, parse_rdb_file};
