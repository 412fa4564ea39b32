//! Parser for the settings documentation text.
//!
//! ```text
//! **** Core ****
//! Counter Factor
//! --------------
//! - 1
//! - 2 (default)
//! How many CPU cycles each instruction takes.
//! ```

use std::path::Path;

use romdb_catalog::SettingDescription;

use crate::error::{RdbError, read_text};

const DEFAULT_MARKER: &str = " (default)";

/// `**** Name ****` → `Name`.
fn category_header(line: &str) -> Option<&str> {
    let inner = line.trim().strip_prefix("****")?.strip_suffix("****")?;
    let name = inner.trim();
    if name.is_empty() { None } else { Some(name) }
}

/// A line made only of dashes.
fn is_rule(line: &str) -> bool {
    let t = line.trim();
    !t.is_empty() && t.chars().all(|c| c == '-')
}

/// Whether a setting starts at `lines[i]`: a name line followed by a rule.
fn starts_setting(lines: &[&str], i: usize) -> bool {
    !lines[i].trim().is_empty()
        && category_header(lines[i]).is_none()
        && !is_rule(lines[i])
        && lines.get(i + 1).is_some_and(|next| is_rule(next))
}

/// Parse setting descriptions grouped under category headers.
///
/// Settings appearing before the first category header are ignored.
pub fn parse_setting_descriptions(text: &str) -> Vec<SettingDescription> {
    let lines: Vec<&str> = text.lines().collect();
    let mut descriptions = Vec::new();
    let mut category: Option<&str> = None;
    let mut i = 0;

    while i < lines.len() {
        if let Some(name) = category_header(lines[i]) {
            category = Some(name);
            i += 1;
            continue;
        }

        let Some(current) = category else {
            i += 1;
            continue;
        };
        if !starts_setting(&lines, i) {
            i += 1;
            continue;
        }

        let setting_name = lines[i].trim().to_string();
        i += 2;

        let mut values = Vec::new();
        while i < lines.len() && lines[i].starts_with("- ") {
            values.push(lines[i].trim_end());
            i += 1;
        }

        let mut body = Vec::new();
        while i < lines.len() && category_header(lines[i]).is_none() && !starts_setting(&lines, i) {
            body.push(lines[i]);
            i += 1;
        }

        let default_value = values.iter().find_map(|v| {
            v.strip_prefix("- ")
                .and_then(|v| v.strip_suffix(DEFAULT_MARKER))
                .map(str::to_string)
        });

        descriptions.push(SettingDescription {
            category: current.to_string(),
            setting_name,
            description: body.join("\n").trim().to_string(),
            possible_values: values.join("\n").trim().to_string(),
            default_value,
        });
    }

    descriptions
}

/// Read and parse a settings documentation file.
pub fn parse_setting_descriptions_file(path: &Path) -> Result<Vec<SettingDescription>, RdbError> {
    Ok(parse_setting_descriptions(&read_text(path)?))
}

#[cfg(test)]
#[path = "tests/info_tests.rs"]
mod tests;
