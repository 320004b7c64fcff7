use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::config::AuthSettings;
use crate::services::auth::{Claims, TokenError};

/// HS256 bearer-token verifier.
///
/// - The shared secret comes from `AuthSettings`; when it is absent every call
///   fails with `SecretNotConfigured` so the server reports a misconfiguration
///   instead of rejecting callers as unauthenticated.
/// - `exp` / `nbf` are checked when present but not required.
/// - `iss` / `aud` are checked only when configured, and are then required.
/// - Debug omits key material.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: Option<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("configured", &self.decoding_key.is_some())
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(settings: &AuthSettings) -> Self {
        let decoding_key = settings
            .jwt_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| DecodingKey::from_secret(s.as_bytes()));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.leeway = settings.leeway_seconds;

        // A configured issuer / audience must also be present in the token.
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
            validation.required_spec_claims.insert("iss".to_string());
        }
        if let Some(audience) = &settings.audience {
            validation.set_audience(&[audience]);
            validation.required_spec_claims.insert("aud".to_string());
        }

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.decoding_key.is_some()
    }

    /// Verify the signature and registered claims, then return the full payload.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let key = self
            .decoding_key
            .as_ref()
            .ok_or(TokenError::SecretNotConfigured)?;

        let data = jsonwebtoken::decode::<Claims>(token, key, &self.validation)
            .map_err(TokenError::Invalid)?;

        Ok(data.claims)
    }
}
