//! File intake service
//!
//! Validates an upload, picks the extractor from the file extension and runs
//! extraction plus normalization off the async runtime.

use crate::error::AppError;
use crate::extract::{self, ExtractionError, SourceFormat};
use crate::normalize;
use crate::schema::Schema;
use axum::body::Bytes;
use tracing::{error, info};

/// An uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct Upload {
    /// Filename sent by the client, possibly empty
    pub filename: String,
    /// File content
    pub bytes: Bytes,
}

/// File intake service
pub struct IntakeService;

impl IntakeService {
    /// Lowercased text after the final dot of a filename
    ///
    /// A filename without a dot yields the whole name, which never matches a
    /// supported extension.
    pub fn file_extension(filename: &str) -> String {
        filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Resolve the source format of a filename
    ///
    /// # Returns
    /// * `Ok(SourceFormat)` - Spreadsheet for xlsx/xls, Pdf for pdf
    /// * `Err(AppError)` - UnsupportedFileType for anything else
    pub fn detect_format(filename: &str) -> Result<SourceFormat, AppError> {
        let extension = Self::file_extension(filename);
        SourceFormat::from_extension(&extension).ok_or(AppError::UnsupportedFileType(extension))
    }

    /// Extract and normalize every row of a payload
    ///
    /// Runs synchronously; every record gets its own import timestamp.
    pub fn parse_records<S: Schema>(
        format: SourceFormat,
        bytes: &[u8],
    ) -> Result<Vec<S::Record>, ExtractionError> {
        let rows = extract::extract_rows(format, bytes, S::header_style(format))?;
        Ok(rows
            .iter()
            .map(|row| S::normalize(row, format, &normalize::now_iso()))
            .collect())
    }

    /// Process an upload into the schema's response envelope
    ///
    /// # Arguments
    /// * `upload` - Filename and content from the multipart request
    ///
    /// # Returns
    /// * `Ok(S::Envelope)` - All records extracted from the file
    /// * `Err(AppError)` - Bad input (400) or a processing failure (500)
    pub async fn process<S: Schema>(upload: Upload) -> Result<S::Envelope, AppError> {
        let Upload { filename, bytes } = upload;

        if filename.is_empty() {
            return Err(AppError::NoSelectedFile);
        }

        let format = Self::detect_format(&filename)?;

        if bytes.is_empty() {
            return Err(AppError::EmptyUpload(filename));
        }

        info!(
            filename = %filename,
            size = bytes.len(),
            format = format.label(),
            schema = S::RECORD_NAME,
            "Processing upload"
        );

        let records = tokio::task::spawn_blocking(move || Self::parse_records::<S>(format, &bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Extraction task failed: {}", e)))?
            .map_err(|e| {
                error!(filename = %filename, error = %e, "Failed to process upload");
                AppError::from(e)
            })?;

        info!(
            filename = %filename,
            count = records.len(),
            "Extracted {} records",
            S::RECORD_NAME
        );

        Ok(S::envelope(filename, records))
    }
}
