/*
 * Responsibility
 * - POST /generate
 * - Read the `image` multipart field, check it against the PNG/JPEG allow-list
 * - Forward it to the generation provider once, persist the returned model
 */
use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartError, MultipartRejection},
    },
    http::StatusCode,
};

use crate::api::dto::generate::GenerateResponse;
use crate::api::extractors::AuthClaims;
use crate::error::AppError;
use crate::services::provider::{ImageMediaType, ImageUpload, ProviderError};
use crate::services::storage::JobId;
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

pub async fn generate(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::bad_request("INVALID_MULTIPART", e.body_text()))?;

    let image = read_image(&mut multipart).await?;

    // No job is minted and nothing leaves the process without credentials.
    if !state.provider.is_configured() {
        return Err(ProviderError::NotConfigured.into());
    }

    let job_id = JobId::new();
    tracing::info!(
        job_id = %job_id,
        sub = claims.subject().unwrap_or("-"),
        provider = state.provider.name(),
        media_type = image.media_type.as_mime(),
        bytes = image.bytes.len(),
        "generation requested"
    );

    let model = state.provider.generate(image).await?;
    state.store.save(&job_id, &model).await?;

    tracing::info!(job_id = %job_id, bytes = model.len(), "model stored");

    Ok(Json(GenerateResponse::for_job(job_id)))
}

/// Find the `image` field and validate its declared media type before reading it.
async fn read_image(multipart: &mut Multipart) -> Result<ImageUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let media_type = field
            .content_type()
            .and_then(ImageMediaType::from_mime)
            .ok_or_else(|| AppError::bad_request("UNSUPPORTED_IMAGE_TYPE", "Unsupported image type"))?;
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        return Ok(ImageUpload {
            file_name,
            media_type,
            bytes,
        });
    }

    Err(AppError::bad_request(
        "MISSING_IMAGE",
        "multipart field `image` is required",
    ))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::bad_request("INVALID_MULTIPART", err.body_text())
    }
}
