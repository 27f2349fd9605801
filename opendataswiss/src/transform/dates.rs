use chrono::{DateTime, NaiveDate, NaiveDateTime};
use common::{Error, Result};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reformats a source timestamp as `YYYY-MM-DDTHH:MM:SSZ`. Offsets are
/// dropped, not applied: the wall-clock time is kept and `Z` appended.
pub fn format_date(field: &'static str, value: &str) -> Result<String> {
    parse_naive(value.trim())
        .map(|dt| dt.format(OUTPUT_FORMAT).to_string())
        .ok_or_else(|| Error::InvalidDate {
            field,
            value: value.to_string(),
        })
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Formats an optional field, treating empty strings as absent.
pub fn format_optional(field: &'static str, value: Option<&str>) -> Result<Option<String>> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(v) => format_date(field, v).map(Some),
        None => Ok(None),
    }
}
