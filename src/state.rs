/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 *   - verifier: TokenVerifier, store: ArtifactStore, provider: ModelProvider
 * - Clone is cheap (everything inside is Arc)
 */
use std::sync::Arc;

use crate::services::auth::TokenVerifier;
use crate::services::provider::ModelProvider;
use crate::services::storage::ArtifactStore;

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub store: Arc<dyn ArtifactStore>,
    pub provider: Arc<dyn ModelProvider>,
}

impl AppState {
    pub fn new(
        verifier: Arc<TokenVerifier>,
        store: Arc<dyn ArtifactStore>,
        provider: Arc<dyn ModelProvider>,
    ) -> Self {
        Self {
            verifier,
            store,
            provider,
        }
    }
}
