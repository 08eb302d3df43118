//! Upload management handlers
//!
//! Provides endpoints for storing an uploaded file and clearing the upload
//! directory.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use sheetmerge_core::{validate_filename, IngestError};

use crate::error::ApiError;
use crate::handlers::MessageResponse;
use crate::state::AppState;

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

/// POST /upload
/// Store the multipart `file` part under its client-supplied name
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    // Not a multipart request at all: same as a missing part
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Upload without multipart body");
            return Err(IngestError::MissingFilePart.into());
        }
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A part without a filename is a plain form value, not a file
        let Some(filename) = field.file_name().map(str::to_string) else {
            return Err(IngestError::MissingFilePart.into());
        };
        validate_filename(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;

        let size = state.store().save(&filename, &data).await?;

        tracing::info!(filename = %filename, size, "File uploaded");

        return Ok(Json(MessageResponse::new(format!(
            "File {} uploaded successfully",
            filename
        ))));
    }

    Err(IngestError::MissingFilePart.into())
}

/// POST /clear-uploads
/// Delete every stored file
pub async fn clear_uploads(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.store().clear().await?;

    tracing::info!(removed, "Uploads cleared");

    Ok(Json(MessageResponse::new("Uploads cleared")))
}
