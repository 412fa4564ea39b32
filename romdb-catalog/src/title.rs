//! Title canonicalization for cross-source matching.
//!
//! Database titles carry GoodN64-style annotations (`(U)`, `(V1.1)`, `[!]`)
//! that the authoritative product list does not. Normalization removes them
//! and folds what remains down to lower-case alphanumerics, so
//! `"Super Game (U) (V1.0)"` and `"Super Game (E)"` compare equal.

use std::sync::LazyLock;

use regex::Regex;

static REGION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([A-Z]\)").expect("static pattern"));
static VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(V\d+\.\d+\)").expect("static pattern"));
static RELEASE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[!\]|\(M\d\)|\[f\d\]|\(beta\)|\(demo\)").expect("static pattern")
});

/// Canonicalize a title for matching.
///
/// Strips, in order: single-letter region tags, `(V<major>.<minor>)` version
/// tags, and the `[!]`, `(M<n>)`, `[f<n>]`, `(beta)`, `(demo)` annotations.
/// Then lower-cases and drops every non-alphanumeric character.
///
/// ```
/// use romdb_catalog::title::normalize_title;
///
/// assert_eq!(normalize_title("Super Game (U) (V1.0)"), "supergame");
/// assert_eq!(normalize_title("Super Game (E)"), "supergame");
/// ```
pub fn normalize_title(title: &str) -> String {
    let stripped = REGION_TAG.replace_all(title, "");
    let stripped = VERSION_TAG.replace_all(&stripped, "");
    let stripped = RELEASE_TAG.replace_all(&stripped, "");

    stripped
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}
