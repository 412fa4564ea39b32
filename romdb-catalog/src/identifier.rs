//! ROM identifier helpers.
//!
//! Identifiers take the form `CRC1-CRC2-C:CC`, where `CC` is the two-digit
//! hex country code from the cartridge header (e.g. `45` for USA).

const CARTRIDGE_MARKER: &str = "-C:";

/// Country codes tried when the exact code yields no match.
const COMMON_COUNTRY_CODES: &[&str] = &["45", "4A", "50", "49", "53", "55", "46", "58", "59"];

/// Extract the cartridge/region code embedded in a ROM identifier.
///
/// The code is the text after the first `-C:` up to the next character that
/// is not ASCII alphanumeric. Returns `None` when there is no marker or the
/// code would be empty.
///
/// ```
/// use romdb_catalog::identifier::cartridge_code;
///
/// assert_eq!(cartridge_code("8F1B2A5A-FC3E9E0E-C:45"), Some("45"));
/// assert_eq!(cartridge_code("8F1B2A5A-FC3E9E0E"), None);
/// ```
pub fn cartridge_code(rom_id: &str) -> Option<&str> {
    let start = rom_id.find(CARTRIDGE_MARKER)? + CARTRIDGE_MARKER.len();
    let rest = &rom_id[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let code = &rest[..end];
    if code.is_empty() { None } else { Some(code) }
}

/// Format a CRC word as 8 upper-case hex digits.
fn format_crc(crc: u32) -> String {
    format!("{crc:08X}")
}

/// Reduce a country code to two upper-case hex digits.
///
/// A lone letter (as stored in the cartridge header, e.g. `'E'`) becomes its
/// ASCII value in hex (`"45"`). Otherwise non-hex characters are dropped and
/// the result is left-padded with zeros.
pub fn normalize_country_code(country: &str) -> String {
    let trimmed = country.trim();
    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return format!("{:02X}", c.to_ascii_uppercase() as u32);
        }
    }

    let digits: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    format!("{digits:0>2}")
}

/// Build the canonical identifier for a CRC pair and country code.
pub fn make_rom_id(crc1: u32, crc2: u32, country: &str) -> String {
    format!(
        "{}-{}{}{}",
        format_crc(crc1),
        format_crc(crc2),
        CARTRIDGE_MARKER,
        normalize_country_code(country)
    )
}

/// Every identifier spelling a database might use for this CRC pair.
///
/// Order matters: the exact identifier first, then bracketed and
/// country-less spellings, then the same CRCs under common country codes.
pub fn candidate_rom_ids(crc1: u32, crc2: u32, country: &str) -> Vec<String> {
    let crcs = format!("{}-{}", format_crc(crc1), format_crc(crc2));
    let country = normalize_country_code(country);
    let standard = format!("{crcs}{CARTRIDGE_MARKER}{country}");

    let bracketed_standard = format!("[{standard}]");
    let bracketed_crcs = format!("[{crcs}]");
    let mut ids = vec![standard, bracketed_standard, crcs.clone(), bracketed_crcs];

    for cc in COMMON_COUNTRY_CODES.iter().filter(|cc| **cc != country) {
        let alt = format!("{crcs}{CARTRIDGE_MARKER}{cc}");
        let bracketed = format!("[{alt}]");
        ids.push(alt);
        ids.push(bracketed);
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_after_marker() {
        assert_eq!(cartridge_code("ABCD-C:XX"), Some("XX"));
        assert_eq!(cartridge_code("635A2BFF-8B022326-C:4A"), Some("4A"));
    }

    #[test]
    fn code_stops_at_delimiter() {
        assert_eq!(cartridge_code("[AAAA-BBBB-C:50]"), Some("50"));
        assert_eq!(cartridge_code("AAAA-C:45-C:4A"), Some("45"));
    }

    #[test]
    fn missing_or_empty_code() {
        assert_eq!(cartridge_code("AAAA-BBBB"), None);
        assert_eq!(cartridge_code("AAAA-BBBB-C:"), None);
    }

    #[test]
    fn country_letter_becomes_hex() {
        assert_eq!(normalize_country_code("E"), "45");
        assert_eq!(normalize_country_code("J"), "4A");
        assert_eq!(normalize_country_code("p"), "50");
    }

    #[test]
    fn country_digits_are_padded() {
        assert_eq!(normalize_country_code("4a"), "4A");
        assert_eq!(normalize_country_code("7"), "07");
        assert_eq!(normalize_country_code(""), "00");
    }

    #[test]
    fn rom_id_format() {
        assert_eq!(
            make_rom_id(0x8F1B2A5A, 0xFC3E9E0E, "E"),
            "8F1B2A5A-FC3E9E0E-C:45"
        );
        assert_eq!(make_rom_id(0x1, 0x2, "50"), "00000001-00000002-C:50");
    }

    #[test]
    fn candidates_start_with_exact_id() {
        let ids = candidate_rom_ids(0x1, 0x2, "45");
        assert_eq!(ids[0], "00000001-00000002-C:45");
        assert_eq!(ids[1], "[00000001-00000002-C:45]");
        assert_eq!(ids[2], "00000001-00000002");
        assert_eq!(ids[3], "[00000001-00000002]");
        // 8 alternate countries, bare and bracketed
        assert_eq!(ids.len(), 4 + 16);
        assert!(!ids[4..].iter().any(|id| id.contains("C:45")));
        assert_eq!(ids[4], "00000001-00000002-C:4A");
        assert_eq!(ids[5], "[00000001-00000002-C:4A]");
    }
}
