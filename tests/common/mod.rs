#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tempfile::TempDir;
use tower::util::ServiceExt;

use image3d_proxy::app::build_router;
use image3d_proxy::config::Config;
use image3d_proxy::services::auth::{Claims, TokenSigner, TokenVerifier};
use image3d_proxy::services::provider::{ImageUpload, ModelProvider, ProviderError};
use image3d_proxy::services::storage::LocalArtifactStore;
use image3d_proxy::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "----image3d-test-boundary";

/// What the fake provider answers with.
#[derive(Clone)]
pub enum Reply {
    Fixed(&'static [u8]),
    /// `GLB:` followed by the uploaded bytes, so every upload yields a distinct artifact.
    Echo,
    Status(u16),
}

/// In-memory `ModelProvider` that counts calls.
pub struct CountingProvider {
    configured: bool,
    reply: Reply,
    calls: AtomicUsize,
}

impl CountingProvider {
    pub fn new(reply: Reply) -> Self {
        Self {
            configured: true,
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new(Reply::Fixed(b"GLBDATA"))
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, image: ImageUpload) -> Result<Bytes, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.configured {
            return Err(ProviderError::NotConfigured);
        }
        match &self.reply {
            Reply::Fixed(bytes) => Ok(Bytes::from_static(*bytes)),
            Reply::Echo => {
                let mut out = b"GLB:".to_vec();
                out.extend_from_slice(&image.bytes);
                Ok(Bytes::from(out))
            }
            Reply::Status(code) => Err(ProviderError::Status {
                status: reqwest::StatusCode::from_u16(*code).unwrap(),
                body: "upstream said no".into(),
            }),
        }
    }
}

pub fn config(model_dir: &std::path::Path, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("JWT_SECRET".to_string(), SECRET.to_string()),
        ("STABILITY_API_KEY".to_string(), "sk-test".to_string()),
        (
            "MODEL_DIR".to_string(),
            model_dir.to_string_lossy().into_owned(),
        ),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_vars(|key| vars.get(key).cloned()).expect("test config")
}

pub struct TestApp {
    pub router: Router,
    pub model_dir: TempDir,
}

impl TestApp {
    pub async fn with_provider(provider: Arc<dyn ModelProvider>) -> Self {
        Self::build(provider, &[]).await
    }

    pub async fn build(provider: Arc<dyn ModelProvider>, extra: &[(&str, &str)]) -> Self {
        let model_dir = TempDir::new().unwrap();
        let config = config(model_dir.path(), extra);

        let store = LocalArtifactStore::open(&config.model_dir).await.unwrap();
        let state = AppState::new(
            Arc::new(TokenVerifier::new(&config.auth)),
            Arc::new(store),
            provider,
        );

        Self {
            router: build_router(state, &config),
            model_dir,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub fn stored_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.model_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    pub fn error_code(&self) -> String {
        self.json()["error"]["code"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

pub fn token() -> String {
    token_signed_with(SECRET, Claims::new().with("sub", "tester").expires_in(300))
}

pub fn token_signed_with(secret: &str, claims: Claims) -> String {
    TokenSigner::new(secret).unwrap().sign(&claims).unwrap()
}

/// Hand-rolled multipart/form-data body with one file field.
pub fn multipart_body(field: &str, content_type: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn generate_request(bearer: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/generate")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len());
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn png_request(bearer: Option<&str>, data: &[u8]) -> Request<Body> {
    generate_request(bearer, multipart_body("image", "image/png", "chair.png", data))
}

pub fn asset_request(bearer: Option<&str>, job_id: &str) -> Request<Body> {
    let mut builder = Request::builder().uri(format!("/asset/{job_id}"));
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}
