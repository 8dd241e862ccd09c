//! Project records
//!
//! Headers are snake-cased for both spreadsheets and PDFs, so the same
//! column names apply to either source. Required skills are comma separated.

use super::Schema;
use crate::extract::{HeaderStyle, RawRow, SourceFormat};
use crate::normalize;
use serde::Serialize;

/// Separator between required skills in a single cell
pub const SKILL_SEPARATOR: char = ',';

/// A project extracted from an upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectRecord {
    /// Project name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Skills the project needs, in source order
    pub required_skills: Vec<String>,
    /// ISO-8601 start date, the unparsed source text, or empty
    pub start_date: String,
    /// ISO-8601 end date, the unparsed source text, or empty
    pub end_date: String,
    /// Budget, 0 when missing or not a plain decimal
    pub budget: f64,
    /// Assigned resources; always empty at import time
    pub resources: Vec<serde_json::Value>,
    /// Project status as written in the source
    pub status: String,
    /// Client the project is for
    pub client_name: String,
    /// Project location
    pub location: String,
    /// When this record was produced
    pub import_date: String,
}

/// Response for POST /upload_project_file
#[derive(Debug, Serialize)]
pub struct ProjectUploadResponse {
    /// Name of the uploaded file
    pub filename: String,
    /// Number of projects extracted
    pub project_count: usize,
    /// Extracted projects
    pub projects: Vec<ProjectRecord>,
}

/// Project schema marker
pub struct Projects;

impl Schema for Projects {
    type Record = ProjectRecord;
    type Envelope = ProjectUploadResponse;

    const RECORD_NAME: &'static str = "project";

    fn header_style(_format: SourceFormat) -> HeaderStyle {
        HeaderStyle::SnakeCase
    }

    fn normalize(row: &RawRow, _format: SourceFormat, imported_at: &str) -> ProjectRecord {
        ProjectRecord {
            name: normalize::text(row.get("name")),
            description: normalize::text(row.get("description")),
            required_skills: normalize::list(row.get("required_skills"), SKILL_SEPARATOR),
            start_date: normalize::date(row.get("start_date")),
            end_date: normalize::date(row.get("end_date")),
            budget: normalize::decimal(row.get("budget")),
            resources: Vec::new(),
            status: normalize::text(row.get("status")),
            client_name: normalize::text(row.get("client_name")),
            location: normalize::text(row.get("location")),
            import_date: imported_at.to_string(),
        }
    }

    fn envelope(filename: String, records: Vec<ProjectRecord>) -> ProjectUploadResponse {
        ProjectUploadResponse {
            filename,
            project_count: records.len(),
            projects: records,
        }
    }
}
