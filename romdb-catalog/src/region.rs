//! Region codes, title region tags, and product identifier consistency checks.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Regions every new database starts with, as (cartridge code, name).
pub const REGION_SEEDS: &[(&str, &str)] = &[
    ("4A", "Japan"),
    ("45", "USA"),
    ("50", "Europe"),
    ("55", "Australia"),
    ("44", "Germany"),
    ("46", "France"),
    ("49", "Italy"),
    ("53", "Spain"),
    ("58", "Europe (Multi-language)"),
    ("59", "Europe (Multi-language)"),
    ("41", "International"),
    ("37", "Beta"),
    ("42", "Brazillian"),
    ("54", "Taiwan"),
    ("20", "Development"),
];

/// USA product identifiers sometimes end in a publisher-specific suffix.
const USA_ALT_SUFFIXES: &[&str] = &["-MSA", "-ASM", "-NOA"];

static TITLE_REGION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((E|U|J|G|F|A|I|S|UK)\)").expect("static pattern"));

/// Human name for a cartridge code; unknown codes get a placeholder that
/// still names the code.
pub fn region_name_for_code(code: &str) -> String {
    REGION_SEEDS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Unknown Region ({code})"))
}

/// Region tag carried in a GoodN64-style title, e.g. the `U` in `(U)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionTag {
    Europe,
    Usa,
    Japan,
    Germany,
    France,
    Australia,
    Italy,
    Spain,
    UnitedKingdom,
}

impl RegionTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "E" => Some(Self::Europe),
            "U" => Some(Self::Usa),
            "J" => Some(Self::Japan),
            "G" => Some(Self::Germany),
            "F" => Some(Self::France),
            "A" => Some(Self::Australia),
            "I" => Some(Self::Italy),
            "S" => Some(Self::Spain),
            "UK" => Some(Self::UnitedKingdom),
            _ => None,
        }
    }

    /// The tag text as it appears between parentheses.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Europe => "E",
            Self::Usa => "U",
            Self::Japan => "J",
            Self::Germany => "G",
            Self::France => "F",
            Self::Australia => "A",
            Self::Italy => "I",
            Self::Spain => "S",
            Self::UnitedKingdom => "UK",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Europe => "Europe",
            Self::Usa => "USA",
            Self::Japan => "Japan",
            Self::Germany => "Germany",
            Self::France => "France",
            Self::Australia => "Australia",
            Self::Italy => "Italy",
            Self::Spain => "Spain",
            Self::UnitedKingdom => "United Kingdom",
        }
    }

    /// Cartridge header country code expected for this region.
    pub fn cartridge_code(&self) -> &'static str {
        match self {
            Self::Japan => "4A",
            Self::Usa => "45",
            Self::Europe | Self::UnitedKingdom => "50",
            Self::Germany => "44",
            Self::France => "46",
            Self::Australia => "55",
            Self::Italy => "49",
            Self::Spain => "53",
        }
    }

    /// Suffix a product identifier for this region should end with.
    pub fn product_suffix(&self) -> &'static str {
        match self {
            Self::Japan => "-JPN",
            Self::Usa => "-USA",
            Self::Europe => "-EUR",
            Self::Germany => "-DEU",
            Self::France => "-FRA",
            Self::Australia => "-AUS",
            Self::Italy => "-ITA",
            Self::Spain => "-ESP",
            Self::UnitedKingdom => "-UKV",
        }
    }

    /// Whether `product_id` carries an acceptable suffix for this region.
    ///
    /// A `-1` revision suffix is accepted after the regional one, and USA
    /// additionally accepts a few publisher-specific suffixes.
    pub fn accepts_product_id(&self, product_id: &str) -> bool {
        let suffix = self.product_suffix();
        if product_id.ends_with(suffix) || product_id.ends_with(&format!("{suffix}-1")) {
            return true;
        }
        *self == Self::Usa && USA_ALT_SUFFIXES.iter().any(|s| product_id.ends_with(s))
    }
}

impl std::fmt::Display for RegionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Find the first region tag in a title.
pub fn region_tag_from_title(title: &str) -> Option<RegionTag> {
    TITLE_REGION_TAG
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| RegionTag::from_tag(m.as_str()))
}

/// Why a proposed product identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationMismatch {
    #[error("cartridge code {found} doesn't match region {region} (expected {expected})")]
    CartridgeCode {
        region: RegionTag,
        expected: &'static str,
        found: String,
    },
    #[error("product ID {product_id} doesn't carry the {expected} suffix for region {region}")]
    ProductSuffix {
        region: RegionTag,
        expected: &'static str,
        product_id: String,
    },
}

/// Check a proposed product identifier against a record's region evidence.
///
/// Passes when either the region tag or the cartridge code is unknown; there
/// is nothing to compare against. An empty product identifier only has its
/// cartridge code checked.
pub fn validate_product_id(
    cartridge_code: Option<&str>,
    region: Option<RegionTag>,
    product_id: &str,
) -> Result<(), ValidationMismatch> {
    let (Some(region), Some(code)) = (region, cartridge_code.filter(|c| !c.is_empty())) else {
        return Ok(());
    };

    let expected = region.cartridge_code();
    if code != expected {
        return Err(ValidationMismatch::CartridgeCode {
            region,
            expected,
            found: code.to_string(),
        });
    }

    if !product_id.is_empty() && !region.accepts_product_id(product_id) {
        return Err(ValidationMismatch::ProductSuffix {
            region,
            expected: region.product_suffix(),
            product_id: product_id.to_string(),
        });
    }

    Ok(())
}
