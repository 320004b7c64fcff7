use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded payload of a verified bearer token.
///
/// Kept as an open key/value map: any claim the issuer embeds is carried through
/// untouched. Handlers receive it as proof that the request was authenticated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Stamp `iat` with the current time and `exp` with `ttl_seconds` later.
    pub fn expires_in(self, ttl_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        self.with("iat", now).with("exp", now + ttl_seconds)
    }

    // `sub` is only used for log correlation.
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }
}
