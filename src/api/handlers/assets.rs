/*
 * Responsibility
 * - GET /asset/{job_id}
 * - Stream a stored model back; unknown (or unparsable) ids are 404
 */
use std::io::ErrorKind;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::api::extractors::AuthClaims;
use crate::error::AppError;
use crate::services::storage::{ARTIFACT_CONTENT_TYPE, ARTIFACT_EXTENSION, JobId, StoreError};
use crate::state::AppState;

pub async fn get_asset(
    State(state): State<AppState>,
    AuthClaims(_claims): AuthClaims,
    Path(job_id): Path<String>,
) -> Result<Response, AppError> {
    // A non-UUID id can never have been minted here; do not touch the filesystem for it.
    let job_id: JobId = job_id.parse().map_err(|_| AppError::not_found("model"))?;

    let location = state
        .store
        .locate(&job_id)
        .await?
        .ok_or_else(|| AppError::not_found("model"))?;

    let file = match tokio::fs::File::open(location.path()).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(AppError::not_found("model")),
        Err(e) => return Err(StoreError::io(location.path(), e).into()),
    };
    let len = file
        .metadata()
        .await
        .map_err(|e| StoreError::io(location.path(), e))?
        .len();

    let disposition =
        HeaderValue::from_str(&format!("inline; filename=\"{job_id}.{ARTIFACT_EXTENSION}\""))
            .map_err(|e| AppError::internal(format!("content-disposition: {e}")))?;

    tracing::debug!(job_id = %job_id, bytes = len, "serving model");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(ARTIFACT_CONTENT_TYPE)),
            (header::CONTENT_LENGTH, HeaderValue::from(len)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
