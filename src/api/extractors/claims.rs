use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::Claims;
use crate::state::AppState;

/// Extractor handing the verified `Claims` to a handler.
/// The bearer middleware must have inserted them into request extensions;
/// if not (route mounted without auth), the request is rejected with 401.
pub struct AuthClaims(pub Claims);

impl FromRequestParts<AppState> for AuthClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or_else(|| AppError::unauthorized("request did not pass bearer authentication"))
    }
}
