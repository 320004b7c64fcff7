pub mod claims;
pub mod signer;
pub mod verifier;

pub use claims::Claims;
pub use signer::TokenSigner;
pub use verifier::TokenVerifier;

/// Errors produced while verifying or signing bearer tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("jwt secret not configured")]
    SecretNotConfigured,

    #[error("token verification failed: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
