//! Upload API handlers
//!
//! POST /upload_project_file and POST /upload_resource_file share one
//! handler, parameterized by the record schema.

use crate::error::AppError;
use crate::schema::Schema;
use crate::services::intake::{IntakeService, Upload};
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{debug, warn};

/// Multipart field that carries the uploaded file
pub const FILE_FIELD: &str = "file";

/// POST /upload_{project,resource}_file - Extract records from an uploaded file
pub async fn upload_file<S: Schema>(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<S::Envelope>, AppError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected upload request: {}", e);
        AppError::InvalidMultipart(e.body_text())
    })?;

    let upload = read_upload(&mut multipart)
        .await?
        .ok_or(AppError::MissingFile)?;

    let envelope = IntakeService::process::<S>(upload).await?;
    Ok(Json(envelope))
}

/// Read the `file` field from a multipart body
///
/// # Returns
/// * `Ok(Some(Upload))` - The first `file` field, with its filename (empty if absent)
/// * `Ok(None)` - The body has no `file` field
/// * `Err(AppError)` - The body could not be read
pub async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            debug!("Ignoring multipart field: {:?}", field.name());
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(Upload { filename, bytes }));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::UploadTooLarge(e.body_text())
    } else {
        AppError::InvalidMultipart(e.body_text())
    }
}
