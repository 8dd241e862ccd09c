//! Output record schemas
//!
//! A schema says how headers are named for each source format, how a raw row
//! becomes a record, and how the records are wrapped in the response
//! envelope. The project and resource schemas deliberately disagree on
//! header naming; each keeps the rules its uploads were written against.

pub mod project;
pub mod resource;

pub use project::{ProjectRecord, ProjectUploadResponse, Projects};
pub use resource::{ResourceRecord, ResourceUploadResponse, Resources};

use crate::extract::{HeaderStyle, RawRow, SourceFormat};
use serde::Serialize;

/// A record type the intake pipeline can produce
pub trait Schema: Send + 'static {
    /// Normalized record, one per raw row
    type Record: Serialize + Send + 'static;
    /// JSON envelope returned to the client
    type Envelope: Serialize + Send;

    /// Singular record name used in logs (e.g. "project")
    const RECORD_NAME: &'static str;

    /// Header naming rule for the given source format
    fn header_style(format: SourceFormat) -> HeaderStyle;

    /// Map one raw row into a record, stamping it with `imported_at`
    fn normalize(row: &RawRow, format: SourceFormat, imported_at: &str) -> Self::Record;

    /// Wrap records with the upload's filename and a count
    fn envelope(filename: String, records: Vec<Self::Record>) -> Self::Envelope;
}
