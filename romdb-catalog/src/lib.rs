//! Game database data model and the pure normalizers shared by every other crate.
//!
//! Nothing in here touches the filesystem or a database. Parsers in `romdb-rdb`
//! produce these types; `romdb-db` persists them; `romdb-import` reconciles them.

pub mod date;
pub mod identifier;
pub mod region;
pub mod title;
pub mod types;

pub use date::{DateLayout, ReleaseDate, parse_release_date};
pub use identifier::{candidate_rom_ids, cartridge_code, make_rom_id, normalize_country_code};
pub use region::{
    REGION_SEEDS, RegionTag, ValidationMismatch, region_name_for_code, region_tag_from_title,
    validate_product_id,
};
pub use title::normalize_title;
pub use types::*;
