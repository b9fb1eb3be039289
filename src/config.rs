use std::time::Duration;

use anyhow::Context;
use axum::http::HeaderValue;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const MAX_JWT_TTL_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub host: String,
    pub port: u16,
    /// Origin allowed to post contact messages from a browser.
    pub cors_allowed_origin: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database = DatabaseConfig {
            url: var("DATABASE_URL").context("DATABASE_URL is not set")?,
            max_connections: parsed_var(&var, "DATABASE_MAX_CONNECTIONS", 10),
            acquire_timeout_secs: parsed_var(&var, "DATABASE_ACQUIRE_TIMEOUT_SECS", 30),
        };

        let secret = var("JWT_SECRET").context("JWT_SECRET is not set")?;
        anyhow::ensure!(!secret.trim().is_empty(), "JWT_SECRET must not be empty");
        let ttl_days = parsed_var(&var, "JWT_TTL_DAYS", 30);
        anyhow::ensure!(
            (1..=MAX_JWT_TTL_DAYS).contains(&ttl_days),
            "JWT_TTL_DAYS must be between 1 and {MAX_JWT_TTL_DAYS}, got {ttl_days}"
        );
        let jwt = JwtConfig { secret, ttl_days };

        let cors_allowed_origin =
            var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        HeaderValue::from_str(&cors_allowed_origin)
            .context("CORS_ALLOWED_ORIGIN is not a valid header value")?;

        Ok(Self {
            database,
            jwt,
            host: var("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed_var(&var, "APP_PORT", 8080),
            cors_allowed_origin,
        })
    }

    pub fn cors_origin(&self) -> HeaderValue {
        HeaderValue::from_str(&self.cors_allowed_origin)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CORS_ORIGIN))
    }
}

fn parsed_var<T: std::str::FromStr>(
    var: impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    var(name)
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
