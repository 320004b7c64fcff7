use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::services::auth::{Claims, TokenError};

/// HS256 token signer sharing the verifier's secret.
///
/// The proxy itself never issues tokens; this backs the `mint-token` tool.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SecretNotConfigured);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key).map_err(TokenError::Signing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_secret_is_refused() {
        assert!(matches!(
            TokenSigner::new(""),
            Err(TokenError::SecretNotConfigured)
        ));
    }

    #[test]
    fn produces_three_part_compact_token() {
        let token = TokenSigner::new("s3cret")
            .unwrap()
            .sign(&Claims::new().with("sub", "cli"))
            .unwrap();

        assert_eq!(token.split('.').count(), 3);
    }
}
