/*
 * Responsibility
 * - Shared AppError definition for every handler and middleware
 * - IntoResponse implementation (HTTP status / JSON error body)
 * - Unified conversion from token / storage / provider errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::TokenError;
use crate::services::provider::ProviderError;
use crate::services::storage::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    /// `reason` is logged, never sent to the client.
    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("{code}: {message}")]
    Misconfigured { code: &'static str, message: String },
    #[error("upstream error: {message} ({detail})")]
    Upstream { message: String, detail: String },
    #[error("upstream timeout")]
    UpstreamTimeout,
    #[error("internal server error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn misconfigured(code: &'static str, message: impl Into<String>) -> Self {
        Self::Misconfigured {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Misconfigured { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::Unauthorized { .. } => {
                ("UNAUTHORIZED", "Invalid authentication token".into())
            }
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found")),
            AppError::PayloadTooLarge => ("PAYLOAD_TOO_LARGE", "upload exceeds size limit".into()),
            AppError::Misconfigured { code, message } => (code, message),
            AppError::Upstream { message, .. } => ("UPSTREAM_ERROR", message),
            AppError::UpstreamTimeout => (
                "UPSTREAM_TIMEOUT",
                "generation provider did not respond in time".into(),
            ),
            AppError::Internal { .. } => ("INTERNAL_SERVER_ERROR", "internal server error".into()),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::SecretNotConfigured => {
                AppError::misconfigured("JWT_SECRET_NOT_CONFIGURED", "JWT secret not configured")
            }
            TokenError::Invalid(err) => AppError::unauthorized(err.to_string()),
            // Signing only happens in tooling; reaching here means a programming error.
            TokenError::Signing(err) => AppError::internal(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::internal(format!("artifact store: {e}"))
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::NotConfigured => AppError::misconfigured(
                "PROVIDER_NOT_CONFIGURED",
                "Stability API key not configured",
            ),
            ProviderError::Timeout => AppError::UpstreamTimeout,
            ProviderError::Status { status, body } => AppError::Upstream {
                message: format!("generation provider responded with {status}"),
                detail: body,
            },
            ProviderError::Transport(err) => AppError::Upstream {
                message: "generation provider request failed".into(),
                detail: err.to_string(),
            },
            ProviderError::Client(err) => AppError::internal(format!("http client: {err}")),
        }
    }
}
