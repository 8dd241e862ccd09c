//! Field coercions shared by every record schema
//!
//! Each coercion takes the raw cell (if the column was present at all) and
//! always produces a value. Nothing here fails: unparsable input falls back
//! to the field's default.

use crate::extract::{CellValue, ISO_DATETIME_FORMAT};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Trimmed string form; missing becomes empty
pub fn text(value: Option<&CellValue>) -> String {
    value
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}

/// Split on `separator`, trim every element and drop empty ones
pub fn list(value: Option<&CellValue>, separator: char) -> Vec<String> {
    let Some(cell) = value else {
        return Vec::new();
    };

    cell.to_string()
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Non-negative decimal, or 0 when the value is not a plain decimal
pub fn decimal(value: Option<&CellValue>) -> f64 {
    let raw = text(value);
    if !is_plain_decimal(&raw) {
        return 0.0;
    }
    raw.parse().unwrap_or(0.0)
}

/// Non-negative integer, or 0 when the value is not all digits
pub fn whole_number(value: Option<&CellValue>) -> u64 {
    let raw = text(value);
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }
    raw.parse().unwrap_or(0)
}

/// ISO-8601 date when the value can be read as one
///
/// Date cells are formatted directly. Text goes through a best-effort parse
/// and is returned unchanged when no known layout matches.
pub fn date(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Empty) => String::new(),
        Some(CellValue::DateTime(dt)) => format_iso(dt),
        Some(CellValue::Text(raw)) => parse_date(raw).unwrap_or_else(|| raw.clone()),
        Some(other) => other.to_string(),
    }
}

/// Current local time, used as the import stamp of every record
pub fn now_iso() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Digits with at most one decimal point and at least one digit
fn is_plain_decimal(raw: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for ch in raw.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

fn parse_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.to_rfc3339());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(format_iso(&dt));
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| format_iso(&dt))
}

fn format_iso(dt: &NaiveDateTime) -> String {
    dt.format(ISO_DATETIME_FORMAT).to_string()
}
