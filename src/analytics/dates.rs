//! Boundary conversion between the API's date encodings and `NaiveDate`

use chrono::NaiveDate;

pub const API_DATE_FORMAT: &str = "%d-%m-%Y";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Short display form, e.g. `21 Jan`
pub const DISPLAY_DATE_FORMAT: &str = "%-d %b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `DD-MM-YYYY`
    DayMonthYear,
    /// `YYYY-MM-DD`, optionally followed by a `T...` time part
    Iso,
    /// Pick by shape: a four-digit leading year means ISO
    Detect,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse '{raw}' as a {expected} date")]
pub struct DateParseError {
    pub raw: String,
    pub expected: &'static str,
}

pub fn parse_date(raw: &str, format: SourceFormat) -> Result<NaiveDate, DateParseError> {
    let raw = raw.trim();
    let format = match format {
        SourceFormat::Detect if looks_iso(raw) => SourceFormat::Iso,
        SourceFormat::Detect => SourceFormat::DayMonthYear,
        explicit => explicit,
    };

    let (input, pattern, expected) = match format {
        SourceFormat::Iso => (iso_date_part(raw), ISO_DATE_FORMAT, "YYYY-MM-DD"),
        _ => (raw, API_DATE_FORMAT, "DD-MM-YYYY"),
    };
    NaiveDate::parse_from_str(input, pattern).map_err(|_| DateParseError {
        raw: raw.to_string(),
        expected,
    })
}

/// Normalize either encoding to the short display form
pub fn format_date(raw: &str, format: SourceFormat) -> Result<String, DateParseError> {
    parse_date(raw, format).map(display_date)
}

pub fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn to_api_date(date: NaiveDate) -> String {
    date.format(API_DATE_FORMAT).to_string()
}

fn looks_iso(raw: &str) -> bool {
    raw.len() >= 10 && raw.as_bytes()[..4].iter().all(u8::is_ascii_digit) && raw.as_bytes()[4] == b'-'
}

fn iso_date_part(raw: &str) -> &str {
    match raw.find('T') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}
