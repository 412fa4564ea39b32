//! Release date normalization.
//!
//! Database files carry dates in whatever layout the contributor typed. The
//! year is the only part that is reliably extracted; the display string is
//! kept exactly as written.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19\d\d|20\d\d)\b").expect("static pattern"));

/// Years outside this range are treated as noise rather than release years.
const PLAUSIBLE_YEARS: std::ops::RangeInclusive<i32> = 1970..=2030;

/// Recognized full-date layouts, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `1998-06-23`
    Iso,
    /// `1998/06/23`
    IsoSlash,
    /// `06/23/1998`
    MonthDayYear,
    /// `23/06/1998`
    DayMonthYear,
    /// `June 23, 1998`
    LongMonthDayYear,
    /// `23 June 1998`
    LongDayMonthYear,
}

const LAYOUTS: &[(DateLayout, &str)] = &[
    (DateLayout::Iso, "%Y-%m-%d"),
    (DateLayout::IsoSlash, "%Y/%m/%d"),
    (DateLayout::MonthDayYear, "%m/%d/%Y"),
    (DateLayout::DayMonthYear, "%d/%m/%Y"),
    (DateLayout::LongMonthDayYear, "%B %d, %Y"),
    (DateLayout::LongDayMonthYear, "%d %B %Y"),
];

/// A release date as written in the source, plus its extracted year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDate {
    /// The original string, unmodified.
    pub display: String,
    pub year: i32,
    /// The first full-date layout the string satisfied, if any.
    pub layout: Option<DateLayout>,
}

impl ReleaseDate {
    /// Whether the display string is a complete, valid calendar date.
    pub fn is_full_date(&self) -> bool {
        self.layout.is_some()
    }
}

/// Parse a free-form release date.
///
/// Returns `None` when no plausible four-digit year appears anywhere in the
/// string; the first plausible one wins. Otherwise the string is returned
/// untouched alongside the year; layout matching only records which format
/// (if any) the string follows.
///
/// ```
/// use romdb_catalog::date::parse_release_date;
///
/// let d = parse_release_date("Released in 1998").unwrap();
/// assert_eq!(d.year, 1998);
/// assert_eq!(d.display, "Released in 1998");
/// assert!(parse_release_date("TBA").is_none());
/// ```
pub fn parse_release_date(s: &str) -> Option<ReleaseDate> {
    if s.is_empty() {
        return None;
    }

    let year = YEAR
        .captures_iter(s)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
        .find(|year| PLAUSIBLE_YEARS.contains(year))?;

    let layout = LAYOUTS
        .iter()
        .find(|(_, fmt)| NaiveDate::parse_from_str(s, fmt).is_ok())
        .map(|(layout, _)| *layout);

    Some(ReleaseDate {
        display: s.to_string(),
        year,
        layout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date() {
        let d = parse_release_date("1998-06-23").unwrap();
        assert_eq!(d.display, "1998-06-23");
        assert_eq!(d.year, 1998);
        assert_eq!(d.layout, Some(DateLayout::Iso));
    }

    #[test]
    fn year_inside_prose() {
        let d = parse_release_date("Released in 1998").unwrap();
        assert_eq!(d.display, "Released in 1998");
        assert_eq!(d.year, 1998);
        assert!(!d.is_full_date());
    }

    #[test]
    fn long_form_layouts() {
        let d = parse_release_date("June 23, 1998").unwrap();
        assert_eq!(d.layout, Some(DateLayout::LongMonthDayYear));
        let d = parse_release_date("23 June 1998").unwrap();
        assert_eq!(d.layout, Some(DateLayout::LongDayMonthYear));
    }

    #[test]
    fn slash_layouts() {
        assert_eq!(
            parse_release_date("06/23/1998").unwrap().layout,
            Some(DateLayout::MonthDayYear)
        );
        assert_eq!(
            parse_release_date("23/06/1998").unwrap().layout,
            Some(DateLayout::DayMonthYear)
        );
        assert_eq!(
            parse_release_date("1998/06/23").unwrap().layout,
            Some(DateLayout::IsoSlash)
        );
    }

    #[test]
    fn malformed_but_year_bearing_is_preserved() {
        let d = parse_release_date("1998-13-45").unwrap();
        assert_eq!(d.display, "1998-13-45");
        assert_eq!(d.year, 1998);
        assert_eq!(d.layout, None);
    }

    #[test]
    fn no_year() {
        assert!(parse_release_date("").is_none());
        assert!(parse_release_date("Unreleased").is_none());
        assert!(parse_release_date("98-06-23").is_none());
        assert!(parse_release_date("19980623").is_none());
    }

    #[test]
    fn implausible_year() {
        assert!(parse_release_date("1965").is_none());
        assert_eq!(parse_release_date("2001").unwrap().year, 2001);
    }

    #[test]
    fn skips_implausible_year_for_a_later_one() {
        let d = parse_release_date("1965 prototype, released 1998").unwrap();
        assert_eq!(d.year, 1998);
        assert_eq!(d.display, "1965 prototype, released 1998");
        assert_eq!(parse_release_date("1998 or 2001").unwrap().year, 1998);
    }
}
