//! Mint an HS256 bearer token for local testing of the proxy.
//!
//! ```text
//! JWT_SECRET=dev-secret cargo run --bin mint-token -- --sub alice --ttl-seconds 3600
//! curl -H "Authorization: Bearer $(...)" -F image=@chair.png http://localhost:3000/generate
//! ```
use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::Value;

use image3d_proxy::config::ConfigError;
use image3d_proxy::services::auth::{Claims, TokenSigner};

#[derive(Parser, Debug)]
#[command(name = "mint-token", version, about)]
struct Args {
    /// Signing secret. Defaults to JWT_SECRET (also read from .env).
    #[arg(long)]
    secret: Option<String>,

    /// Subject claim (`sub`).
    #[arg(long)]
    sub: Option<String>,

    /// Lifetime in seconds; 0 omits `exp`.
    #[arg(long, default_value_t = 3600)]
    ttl_seconds: i64,

    /// Issuer claim (`iss`).
    #[arg(long)]
    iss: Option<String>,

    /// Audience claim (`aud`).
    #[arg(long)]
    aud: Option<String>,

    /// Extra claim as key=value. Values that parse as JSON are kept typed.
    #[arg(long = "claim", value_name = "KEY=VALUE")]
    claims: Vec<String>,
}

fn parse_claim(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("claim must look like key=value: {raw}");
    };
    if key.is_empty() {
        bail!("claim key must not be empty: {raw}");
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let secret = args
        .secret
        .or_else(|| std::env::var("JWT_SECRET").ok())
        .filter(|s| !s.is_empty())
        .ok_or(ConfigError::Missing("JWT_SECRET"))?;

    let mut claims = Claims::new();
    if let Some(sub) = args.sub {
        claims.insert("sub", sub);
    }
    if let Some(iss) = args.iss {
        claims.insert("iss", iss);
    }
    if let Some(aud) = args.aud {
        claims.insert("aud", aud);
    }
    for raw in &args.claims {
        let (key, value) = parse_claim(raw)?;
        claims.insert(key, value);
    }
    if args.ttl_seconds > 0 {
        claims = claims.expires_in(args.ttl_seconds);
    }

    let token = TokenSigner::new(&secret)?
        .sign(&claims)
        .context("failed to sign token")?;
    println!("{token}");
    Ok(())
}
