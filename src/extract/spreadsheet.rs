//! Spreadsheet extraction
//!
//! Reads the first worksheet of a workbook and treats the first row of its
//! used range as the header.

use super::{CellValue, ExtractionError, HeaderStyle, RawRow, ISO_DATETIME_FORMAT};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveDateTime;
use std::io::Cursor;
use tracing::debug;

/// Extract raw rows from the first sheet of a workbook payload
pub fn extract_rows(bytes: &[u8], headers: HeaderStyle) -> Result<Vec<RawRow>, ExtractionError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ExtractionError::NoWorksheet)??;

    debug!(
        height = range.height(),
        width = range.width(),
        "Read first worksheet"
    );

    Ok(rows_from_range(&range, headers))
}

/// Convert a worksheet range into raw rows
///
/// Blank header cells drop their column, the leftmost of duplicate headers
/// wins, and rows with no content at all are skipped.
pub fn rows_from_range(range: &Range<Data>, headers: HeaderStyle) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let columns: Vec<Option<String>> = header_row
        .iter()
        .map(|cell| {
            let name = headers.apply(&CellValue::from(cell).to_string());
            if name.trim().is_empty() {
                None
            } else {
                Some(name)
            }
        })
        .collect();

    rows.filter_map(|cells| {
        let mut row = RawRow::new();
        for (column, cell) in columns.iter().zip(cells) {
            if let Some(name) = column {
                row.entry(name.clone()).or_insert_with(|| CellValue::from(cell));
            }
        }
        if row.values().all(CellValue::is_empty) {
            None
        } else {
            Some(row)
        }
    })
    .collect()
}

impl From<&Data> for CellValue {
    fn from(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Empty,
            Data::String(text) => CellValue::Text(text.clone()),
            Data::Float(number) => CellValue::Number(*number),
            Data::Int(number) => CellValue::Int(*number),
            Data::Bool(flag) => CellValue::Bool(*flag),
            Data::DateTime(excel) => match excel.as_datetime() {
                Some(dt) => CellValue::DateTime(dt),
                None => CellValue::Number(excel.as_f64()),
            },
            Data::DateTimeIso(text) => NaiveDateTime::parse_from_str(text, ISO_DATETIME_FORMAT)
                .map(CellValue::DateTime)
                .unwrap_or_else(|_| CellValue::Text(text.clone())),
            Data::DurationIso(text) => CellValue::Text(text.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn test_rows_use_snake_case_headers() {
        let range = range_from(&[
            &[text("Name"), text("Client Name"), text(" Budget ")],
            &[text("Apollo"), text("Acme"), Data::Float(1500.0)],
        ]);

        let rows = rows_from_range(&range, HeaderStyle::SnakeCase);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], CellValue::Text("Apollo".to_string()));
        assert_eq!(rows[0]["client_name"], CellValue::Text("Acme".to_string()));
        assert_eq!(rows[0]["budget"], CellValue::Number(1500.0));
    }

    #[test]
    fn test_rows_keep_verbatim_headers() {
        let range = range_from(&[
            &[text("Name"), text("Capacity_hours")],
            &[text("Ada"), Data::Int(40)],
        ]);

        let rows = rows_from_range(&range, HeaderStyle::Verbatim);
        assert!(rows[0].contains_key("Name"));
        assert!(rows[0].contains_key("Capacity_hours"));
        assert!(!rows[0].contains_key("name"));
    }

    #[test]
    fn test_header_only_range_yields_no_rows() {
        let range = range_from(&[&[text("Name"), text("Role")]]);
        assert!(rows_from_range(&range, HeaderStyle::Verbatim).is_empty());
    }

    #[test]
    fn test_empty_range_yields_no_rows() {
        let range: Range<Data> = Range::empty();
        assert!(rows_from_range(&range, HeaderStyle::SnakeCase).is_empty());
    }

    #[test]
    fn test_blank_rows_and_blank_headers_are_skipped() {
        let range = range_from(&[
            &[text("Name"), Data::Empty, text("Status")],
            &[Data::Empty, Data::Empty, Data::Empty],
            &[text("Apollo"), text("ignored"), text("Active")],
        ]);

        let rows = rows_from_range(&range, HeaderStyle::SnakeCase);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0]["status"], CellValue::Text("Active".to_string()));
    }

    #[test]
    fn test_duplicate_headers_keep_leftmost() {
        let range = range_from(&[
            &[text("Name"), text("name")],
            &[text("first"), text("second")],
        ]);

        let rows = rows_from_range(&range, HeaderStyle::SnakeCase);
        assert_eq!(rows[0]["name"], CellValue::Text("first".to_string()));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(
            CellValue::from(&Data::Error(calamine::CellErrorType::NA)),
            CellValue::Empty
        );
        assert_eq!(CellValue::from(&Data::Bool(false)), CellValue::Bool(false));
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("2024-05-01T08:00:00".to_string())).to_string(),
            "2024-05-01T08:00:00"
        );
        assert_eq!(
            CellValue::from(&Data::DateTimeIso("not a date".to_string())),
            CellValue::Text("not a date".to_string())
        );
    }

    #[test]
    fn test_garbage_payload_is_workbook_error() {
        let result = extract_rows(b"definitely not a workbook", HeaderStyle::SnakeCase);
        match result {
            Err(ExtractionError::Workbook(_)) => {
                // Expected error
            }
            other => panic!("Expected Workbook error, got: {:?}", other),
        }
    }
}
