//! Parser for the authoritative product code list.
//!
//! Each line holds a title and a product identifier, either tab-separated or
//! with the identifier as the trailing `NUS-XXXX-XXX[-n]` token:
//!
//! ```text
//! <!-- comment -->
//! Mystical Ninja Starring Goemon	NUS-NGMJ-USA
//! Super Mario 64 NUS-NSME-USA
//! ```

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{RdbError, read_text};

static TRAILING_PRODUCT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s+(NUS-[A-Z0-9]{3,4}-[A-Z]{3}(?:-\d+)?)$").expect("static pattern")
});

/// One title / product identifier pair from the code list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub title: String,
    pub product_id: String,
}

/// Parse the code list. Lines that fit neither layout are skipped.
pub fn parse_codes(text: &str) -> Vec<CodeEntry> {
    let mut codes = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("<!--") {
            continue;
        }

        if line.contains('\t') {
            let mut parts = line.split('\t');
            let title = parts.next().unwrap_or("").trim();
            let product_id = parts.next_back().unwrap_or("").trim();
            codes.push(CodeEntry {
                title: title.to_string(),
                product_id: product_id.to_string(),
            });
        } else if let Some(caps) = TRAILING_PRODUCT_ID.captures(line) {
            codes.push(CodeEntry {
                title: caps[1].trim().to_string(),
                product_id: caps[2].trim().to_string(),
            });
        } else {
            log::debug!("Skipping unrecognized code line {line:?}");
        }
    }

    codes
}

/// Read and parse a code list file.
pub fn parse_codes_file(path: &Path) -> Result<Vec<CodeEntry>, RdbError> {
    Ok(parse_codes(&read_text(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_separated() {
        let codes = parse_codes("Mystical Ninja\tNUS-NMN-USA-1\n");
        assert_eq!(
            codes,
            vec![CodeEntry {
                title: "Mystical Ninja".to_string(),
                product_id: "NUS-NMN-USA-1".to_string(),
            }]
        );
    }

    #[test]
    fn tab_uses_last_column() {
        let codes = parse_codes("Wave Race 64\tShindou\tNUS-NWRJ-JPN");
        assert_eq!(codes[0].title, "Wave Race 64");
        assert_eq!(codes[0].product_id, "NUS-NWRJ-JPN");
    }

    #[test]
    fn trailing_identifier() {
        let codes = parse_codes("Super Mario 64   NUS-NSME-USA\nStar Fox 64 NUS-NFXE-USA-1");
        assert_eq!(codes.len(), 2);
        assert_eq!(codes[0].title, "Super Mario 64");
        assert_eq!(codes[0].product_id, "NUS-NSME-USA");
        assert_eq!(codes[1].product_id, "NUS-NFXE-USA-1");
    }

    #[test]
    fn skips_comments_and_noise() {
        let text = "<!-- generated list -->\n\n# Heading\nNo identifier here\r\nF-Zero X NUS-CFZE-USA\r\n";
        let codes = parse_codes(text);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].title, "F-Zero X");
    }
}
