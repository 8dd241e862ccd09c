//! Extraction-specific error types
//!
//! Whole-file failures raised while reading a workbook or a PDF.

use thiserror::Error;

/// Errors that can occur while turning a payload into raw rows
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Payload could not be opened or read as a workbook
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// Workbook opened but has no sheet to read
    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    /// Payload could not be parsed as a PDF document
    #[error("Failed to read PDF: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
}
