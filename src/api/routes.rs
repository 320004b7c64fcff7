/*
 * Responsibility
 * - URL structure: /health (public), /generate and /asset/{job_id} (bearer)
 * - Bearer auth is applied with route_layer on the protected group only
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{assets::get_asset, generate::generate, health::health};
use crate::middleware::bearer_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/generate", post(generate))
        .route("/asset/{job_id}", get(get_asset));

    Router::new()
        .route("/health", get(health))
        .merge(bearer_auth::apply(protected, state))
}
