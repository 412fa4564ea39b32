//! Lossless in-memory form of a database file.

use romdb_catalog::Metadata;

/// What a section contributes once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A game entry keyed by its ROM identifier.
    Game,
    /// A reserved section whose lines become namespaced metadata.
    Metadata,
}

/// One `[key]` section with its raw text.
///
/// `text` runs from the first byte of the header line up to (not including)
/// the next header line, so it carries its own line endings and trailing
/// blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: String,
    /// Position within the source document, starting at 0.
    pub index: usize,
    pub kind: SectionKind,
    pub text: String,
}

impl Section {
    /// The text after the header line.
    pub fn body(&self) -> &str {
        match self.text.find('\n') {
            Some(pos) => &self.text[pos + 1..],
            None => "",
        }
    }

    fn line_ending(&self) -> &'static str {
        if self.text.contains("\r\n") { "\r\n" } else { "\n" }
    }

    /// Set `key=value` in the section text.
    ///
    /// Every existing line for `key` is rewritten in place. Otherwise a new
    /// line is inserted before the first blank line of the section, or
    /// appended when the section has none. All other bytes are untouched.
    pub fn upsert_key(&mut self, key: &str, value: &str) {
        let eol = self.line_ending();
        let new_line = format!("{key}={value}");

        let mut lines: Vec<String> = self
            .text
            .split_inclusive('\n')
            .map(str::to_string)
            .collect();

        let mut replaced = false;
        for line in lines.iter_mut().skip(1) {
            if line_key(line) == Some(key) {
                let ending = &line[line.trim_end_matches(['\r', '\n']).len()..];
                *line = format!("{new_line}{ending}");
                replaced = true;
            }
        }

        if !replaced {
            let blank = lines
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, l)| l.trim().is_empty())
                .map(|(i, _)| i);
            match blank {
                Some(i) => lines.insert(i, format!("{new_line}{eol}")),
                None => {
                    if let Some(last) = lines.last_mut() {
                        if !last.ends_with('\n') {
                            last.push_str(eol);
                        }
                    }
                    lines.push(format!("{new_line}{eol}"));
                }
            }
        }

        self.text = lines.concat();
    }
}

/// The trimmed key of a `key=value` line, if it is one.
fn line_key(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.starts_with("//") || trimmed.starts_with('[') {
        return None;
    }
    trimmed.split_once('=').map(|(k, _)| k.trim())
}

/// A tokenized database file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdbDocument {
    /// Everything before the first section header.
    pub preamble: String,
    /// Sections in source order.
    pub sections: Vec<Section>,
    pub metadata: Metadata,
}

impl RdbDocument {
    /// Reassemble the document text, sections ordered by position index.
    ///
    /// For an unmodified document this is byte-identical to the input.
    pub fn render(&self) -> String {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.index);

        let capacity = self.preamble.len() + ordered.iter().map(|s| s.text.len()).sum::<usize>();
        let mut out = String::with_capacity(capacity);
        out.push_str(&self.preamble);
        for section in ordered {
            out.push_str(&section.text);
        }
        out
    }

    pub fn game_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().filter(|s| s.kind == SectionKind::Game)
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.iter().find(|s| s.index == index)
    }

    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.index == index)
    }
}
