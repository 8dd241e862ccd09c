//! Resource (workforce) records
//!
//! Spreadsheets are read with their capitalized headers as written
//! (`Name`, `Capacity_hours`, ...). PDF headers are only trimmed and
//! lowercased, so a PDF column called "Capacity Hours" does not match
//! `capacity_hours`. Skills are semicolon separated.

use super::Schema;
use crate::extract::{HeaderStyle, RawRow, SourceFormat};
use crate::normalize;
use serde::Serialize;

/// Separator between skills in a single cell
pub const SKILL_SEPARATOR: char = ';';

/// Source column names for each resource field
#[derive(Debug, Clone, Copy)]
pub struct ResourceColumns {
    /// Column holding the resource name
    pub name: &'static str,
    /// Column holding the role
    pub role: &'static str,
    /// Column holding the skills list
    pub skills: &'static str,
    /// Column holding the proficiency level
    pub proficiency: &'static str,
    /// Column holding weekly capacity in hours
    pub capacity_hours: &'static str,
    /// Column holding the availability start date
    pub availability_start: &'static str,
    /// Column holding the location
    pub location: &'static str,
    /// Column holding the hourly rate
    pub rate_per_hour: &'static str,
    /// Column holding the current project
    pub current_project: &'static str,
}

/// Column names expected in resource spreadsheets
pub const SPREADSHEET_COLUMNS: ResourceColumns = ResourceColumns {
    name: "Name",
    role: "Role",
    skills: "Skills",
    proficiency: "Proficiency",
    capacity_hours: "Capacity_hours",
    availability_start: "Availability_start",
    location: "Location",
    rate_per_hour: "Rate_per_hour",
    current_project: "Current_project",
};

/// Column names expected in resource PDF tables
pub const PDF_COLUMNS: ResourceColumns = ResourceColumns {
    name: "name",
    role: "role",
    skills: "skills",
    proficiency: "proficiency",
    capacity_hours: "capacity_hours",
    availability_start: "availability_start",
    location: "location",
    rate_per_hour: "rate_per_hour",
    current_project: "current_project",
};

/// A workforce resource extracted from an upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    /// Person or resource name
    pub name: String,
    /// Role or job title
    pub role: String,
    /// Skills in source order
    pub skills: Vec<String>,
    /// Proficiency level as written
    pub proficiency: String,
    /// Capacity in hours, 0 when missing or not all digits
    pub capacity_hours: u64,
    /// ISO-8601 availability date, the unparsed source text, or empty
    pub availability_start: String,
    /// Location
    pub location: String,
    /// Hourly rate, 0 when missing or not a plain decimal
    pub rate_per_hour: f64,
    /// Project the resource currently works on
    pub current_project: String,
    /// When this record was produced
    pub import_date: String,
}

/// Response for POST /upload_resource_file
#[derive(Debug, Serialize)]
pub struct ResourceUploadResponse {
    /// Name of the uploaded file
    pub filename: String,
    /// Number of resources extracted
    pub resource_count: usize,
    /// Extracted resources
    pub resources: Vec<ResourceRecord>,
}

/// Resource schema marker
pub struct Resources;

impl Resources {
    /// Column names used for the given source format
    pub fn columns(format: SourceFormat) -> &'static ResourceColumns {
        match format {
            SourceFormat::Spreadsheet => &SPREADSHEET_COLUMNS,
            SourceFormat::Pdf => &PDF_COLUMNS,
        }
    }
}

impl Schema for Resources {
    type Record = ResourceRecord;
    type Envelope = ResourceUploadResponse;

    const RECORD_NAME: &'static str = "resource";

    fn header_style(format: SourceFormat) -> HeaderStyle {
        match format {
            SourceFormat::Spreadsheet => HeaderStyle::Verbatim,
            SourceFormat::Pdf => HeaderStyle::Lowercase,
        }
    }

    fn normalize(row: &RawRow, format: SourceFormat, imported_at: &str) -> ResourceRecord {
        let columns = Self::columns(format);
        ResourceRecord {
            name: normalize::text(row.get(columns.name)),
            role: normalize::text(row.get(columns.role)),
            skills: normalize::list(row.get(columns.skills), SKILL_SEPARATOR),
            proficiency: normalize::text(row.get(columns.proficiency)),
            capacity_hours: normalize::whole_number(row.get(columns.capacity_hours)),
            availability_start: normalize::date(row.get(columns.availability_start)),
            location: normalize::text(row.get(columns.location)),
            rate_per_hour: normalize::decimal(row.get(columns.rate_per_hour)),
            current_project: normalize::text(row.get(columns.current_project)),
            import_date: imported_at.to_string(),
        }
    }

    fn envelope(filename: String, records: Vec<ResourceRecord>) -> ResourceUploadResponse {
        ResourceUploadResponse {
            filename,
            resource_count: records.len(),
            resources: records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::CellValue;

    fn row(cells: &[(&str, CellValue)]) -> RawRow {
        cells
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn test_normalize_spreadsheet_row() {
        let raw = row(&[
            ("Name", text("Ada Lovelace")),
            ("Role", text("Engineer")),
            ("Skills", text("Rust; Go ;;SQL")),
            ("Proficiency", text("Senior")),
            ("Capacity_hours", CellValue::Number(32.0)),
            ("Availability_start", text("2024-02-01")),
            ("Location", text("London")),
            ("Rate_per_hour", CellValue::Number(95.5)),
            ("Current_project", text("Apollo")),
        ]);

        let record = Resources::normalize(&raw, SourceFormat::Spreadsheet, "now");
        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.skills, vec!["Rust", "Go", "SQL"]);
        assert_eq!(record.capacity_hours, 32);
        assert_eq!(record.availability_start, "2024-02-01T00:00:00");
        assert_eq!(record.rate_per_hour, 95.5);
        assert_eq!(record.current_project, "Apollo");
    }

    #[test]
    fn test_spreadsheet_ignores_lowercase_headers() {
        let raw = row(&[("name", text("Ada")), ("role", text("Engineer"))]);
        let record = Resources::normalize(&raw, SourceFormat::Spreadsheet, "now");
        assert_eq!(record.name, "");
        assert_eq!(record.role, "");
    }

    #[test]
    fn test_normalize_pdf_row() {
        let raw = row(&[
            ("name", text("Grace")),
            ("capacity_hours", text("40h")),
            ("rate_per_hour", text("$120")),
            ("availability_start", text("next month")),
        ]);

        let record = Resources::normalize(&raw, SourceFormat::Pdf, "now");
        assert_eq!(record.name, "Grace");
        assert_eq!(record.capacity_hours, 0);
        assert_eq!(record.rate_per_hour, 0.0);
        assert_eq!(record.availability_start, "next month");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_header_styles_differ_by_source() {
        assert_eq!(
            Resources::header_style(SourceFormat::Spreadsheet),
            HeaderStyle::Verbatim
        );
        assert_eq!(
            Resources::header_style(SourceFormat::Pdf),
            HeaderStyle::Lowercase
        );
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = Resources::envelope("team.pdf".to_string(), Vec::new());
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["filename"], "team.pdf");
        assert_eq!(json["resource_count"], 0);
        assert_eq!(json["resources"], serde_json::json!([]));
    }
}
