//! Image upload handler.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use domain::models::UploadedFile;
use tracing::{info, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_upload;
use crate::services::upload::{object_key, UploadError, UploadPolicy};

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::validation(err.body_text())
    }
}

fn rejected(err: UploadError) -> ApiError {
    warn!(error = %err, "Upload rejected");
    record_upload("rejected");
    err.into()
}

/// Store an image from the multipart `file` field and return its URL.
///
/// POST /api/v1/uploads
pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedFile>), ApiError> {
    let policy = UploadPolicy {
        max_file_size_bytes: state.config.uploads.max_file_size_bytes,
        allowed_mime_types: state.config.uploads.allowed_mime_types.clone(),
    };

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let declared = UploadPolicy::content_type(field.content_type(), field.file_name());
        let content_type = policy.check_type(declared.as_deref()).map_err(rejected)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            policy
                .check_size(bytes.len() + chunk.len())
                .map_err(rejected)?;
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            return Err(rejected(UploadError::MissingFile));
        }

        let key = object_key(&content_type);
        let url = state
            .object_store
            .put(&key, &bytes, &content_type)
            .await
            .map_err(|err| {
                record_upload("failed");
                ApiError::from(err)
            })?;

        info!(key = %key, content_type = %content_type, size = bytes.len(), "File uploaded");
        record_upload("stored");

        return Ok((
            StatusCode::CREATED,
            Json(UploadedFile {
                url,
                content_type: Some(content_type),
                size: Some(bytes.len() as u64),
            }),
        ));
    }

    Err(rejected(UploadError::MissingFile))
}
