/*
 * Responsibility
 * - Load environment variables / settings (JWT secret, provider key, storage dir, CORS, ...)
 * - Validate values (unparsable values fail startup; missing secrets surface per request)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_STABILITY_API_URL: &str = "https://api.stability.ai/vX/3d/generate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("development").to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings for bearer-token verification.
#[derive(Clone)]
pub struct AuthSettings {
    pub jwt_secret: Option<String>,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    pub leeway_seconds: u64,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthSettings")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

/// Settings for the outbound image-to-3D provider.
#[derive(Clone)]
pub struct ProviderSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub auth: AuthSettings,
    pub provider: ProviderSettings,

    pub model_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the process env.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset so `JWT_SECRET=` in a .env file does not pass as a secret.
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = parse_or(&non_empty, "PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(non_empty("APP_ENV").as_deref());

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let auth = AuthSettings {
            jwt_secret: non_empty("JWT_SECRET"),
            issuer: non_empty("JWT_ISSUER"),
            audience: non_empty("JWT_AUDIENCE"),
            leeway_seconds: parse_or(&non_empty, "JWT_LEEWAY_SECONDS", 0)?,
        };

        let timeout_seconds: u64 = parse_or(&non_empty, "PROVIDER_TIMEOUT_SECONDS", 60)?;
        if timeout_seconds == 0 {
            return Err(ConfigError::Invalid("PROVIDER_TIMEOUT_SECONDS"));
        }

        let provider = ProviderSettings {
            api_key: non_empty("STABILITY_API_KEY"),
            api_url: non_empty("STABILITY_API_URL")
                .unwrap_or_else(|| DEFAULT_STABILITY_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_seconds),
        };

        let model_dir = non_empty("MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("models"));

        let max_upload_bytes: usize = parse_or(&non_empty, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            auth,
            provider,
            model_dir,
            max_upload_bytes,
        })
    }

    /// Server-wide request deadline. Sits above the provider timeout so the
    /// upstream error is what the caller sees, not a generic 408.
    pub fn request_timeout(&self) -> Duration {
        self.provider.timeout + Duration::from_secs(30)
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
