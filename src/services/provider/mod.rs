//! Outbound image-to-3D generation providers.
//!
//! The handler talks to `ModelProvider`; `StabilityProvider` is the real
//! HTTP implementation. One attempt per call, no retries.

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;

pub mod image;
pub mod stability;

pub use image::{ImageMediaType, ImageUpload};
pub use stability::StabilityProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider api key not configured")]
    NotConfigured,

    #[error("provider timed out")]
    Timeout,

    #[error("provider responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("provider request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to build provider client: {0}")]
    Client(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(e)
        }
    }
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (for logging).
    fn name(&self) -> &'static str;

    /// Whether credentials are present. Checked before any job is minted.
    fn is_configured(&self) -> bool;

    /// Upload `image` and return the generated model bytes untouched.
    async fn generate(&self, image: ImageUpload) -> Result<Bytes, ProviderError>;
}
