//! Bearer token verification → `Claims` into request extensions.
//!
//! - Runs before the handler and before any body extractor, so a rejected
//!   request never reaches the provider or the artifact store.
//! - Missing / non-Bearer header → 401.
//! - Verification failure → 401; missing secret → 500 (see `TokenError`).

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

/// Require a verified bearer token on every route of `router`.
///
/// Uses `route_layer` so unmatched paths still 404 instead of 401.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn bearer_auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&req)
        .ok_or_else(|| AppError::unauthorized("missing or malformed Authorization header"))?;

    let claims = state.verifier.verify(token)?;

    tracing::debug!(sub = claims.subject().unwrap_or("-"), "bearer token accepted");

    // middleware → extractor
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
