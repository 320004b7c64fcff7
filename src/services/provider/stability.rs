//! Stability AI image-to-3D client.

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, header, multipart};

use super::{ImageUpload, ModelProvider, ProviderError};
use crate::config::ProviderSettings;

/// Upstream error bodies are kept for logs only; cap what we hold on to.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Debug omits the API key.
#[derive(Clone)]
pub struct StabilityProvider {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for StabilityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StabilityProvider")
            .field("api_url", &self.api_url)
            .field("configured", &self.api_key.is_some())
            .finish()
    }
}

impl StabilityProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl ModelProvider for StabilityProvider {
    fn name(&self) -> &'static str {
        "stability"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, image: ImageUpload) -> Result<Bytes, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::NotConfigured)?;

        let part = multipart::Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name_or_default())
            .mime_str(image.media_type.as_mime())
            .map_err(ProviderError::Transport)?;
        let form = multipart::Form::new().part("image", part);

        tracing::debug!(
            url = %self.api_url,
            bytes = image.bytes.len(),
            media_type = image.media_type.as_mime(),
            "sending image to generation provider"
        );

        let response = self
            .client
            .post(&self.api_url)
            .header(header::AUTHORIZATION, format!("Bearer {api_key}"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status,
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(response.bytes().await?)
    }
}
