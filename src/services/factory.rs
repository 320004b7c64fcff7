/// Factory: build the services held by `AppState` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;
use crate::services::provider::{ModelProvider, ProviderError, StabilityProvider};
use crate::services::storage::{ArtifactStore, LocalArtifactStore, StoreError};

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    let verifier = TokenVerifier::new(&config.auth);
    if !verifier.is_configured() {
        tracing::warn!("JWT_SECRET is not set; every authenticated request will fail with 500");
    }
    Arc::new(verifier)
}

pub async fn build_artifact_store(config: &Config) -> Result<Arc<dyn ArtifactStore>, StoreError> {
    let store = LocalArtifactStore::open(&config.model_dir).await?;
    Ok(Arc::new(store))
}

pub fn build_model_provider(config: &Config) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let provider = StabilityProvider::new(&config.provider)?;
    if !provider.is_configured() {
        tracing::warn!("STABILITY_API_KEY is not set; /generate will fail with 500");
    }
    Ok(Arc::new(provider))
}
