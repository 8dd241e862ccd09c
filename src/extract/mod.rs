//! Row extraction from uploaded documents
//!
//! Turns spreadsheet and PDF payloads into raw rows: column name to
//! unparsed cell value. Extractors know nothing about the output schema;
//! they only apply the header style they are given.

pub mod error;
pub mod pdf;
pub mod spreadsheet;

pub use error::ExtractionError;

use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fmt;

/// ISO-8601 layout used for every date-time emitted by the service
pub const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A single loosely typed cell as read from the source document
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank cell, or a cell holding an error value
    Empty,
    /// Text content, untrimmed
    Text(String),
    /// Floating point number
    Number(f64),
    /// Integer number
    Int(i64),
    /// Boolean cell
    Bool(bool),
    /// Date or date-time cell
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Whether the cell carries no usable content
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(text) => f.write_str(text),
            // f64 Display already drops the fraction of integral values
            CellValue::Number(number) => write!(f, "{}", number),
            CellValue::Int(number) => write!(f, "{}", number),
            CellValue::Bool(flag) => write!(f, "{}", flag),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format(ISO_DATETIME_FORMAT)),
        }
    }
}

/// Column name to cell value, one per extracted row
pub type RawRow = HashMap<String, CellValue>;

/// Source document format, chosen from the upload's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Excel-family workbook
    Spreadsheet,
    /// PDF document
    Pdf,
}

impl SourceFormat {
    /// Map a lowercased extension onto a supported format
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "xlsx" | "xls" => Some(SourceFormat::Spreadsheet),
            "pdf" => Some(SourceFormat::Pdf),
            _ => None,
        }
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::Spreadsheet => "spreadsheet",
            SourceFormat::Pdf => "pdf",
        }
    }
}

/// How header cells are turned into column names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Keep the header text exactly as written
    Verbatim,
    /// Trim and lowercase, keep inner spaces
    Lowercase,
    /// Trim, lowercase and replace spaces with underscores
    SnakeCase,
}

impl HeaderStyle {
    /// Apply the style to a raw header cell
    pub fn apply(&self, header: &str) -> String {
        match self {
            HeaderStyle::Verbatim => header.to_string(),
            HeaderStyle::Lowercase => header.trim().to_lowercase(),
            HeaderStyle::SnakeCase => header.trim().to_lowercase().replace(' ', "_"),
        }
    }
}

/// Extract raw rows from a payload in the given format
pub fn extract_rows(
    format: SourceFormat,
    bytes: &[u8],
    headers: HeaderStyle,
) -> Result<Vec<RawRow>, ExtractionError> {
    match format {
        SourceFormat::Spreadsheet => spreadsheet::extract_rows(bytes, headers),
        SourceFormat::Pdf => pdf::extract_rows(bytes, headers),
    }
}
