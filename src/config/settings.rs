//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_MINUTES, DEFAULT_DATABASE_URL, DEFAULT_REDIS_URL,
    DEFAULT_REFRESH_TOKEN_DAYS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_ACCESS_TOKEN_MINUTES, MAX_REFRESH_TOKEN_DAYS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    /// Expected `aud` of Google ID tokens; unchecked when absent
    pub google_client_id: Option<String>,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("redis_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("refresh_token_days", &self.refresh_token_days)
            .field("google_client_id", &self.google_client_id)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails when JWT_SECRET is missing in a release build or shorter than
    /// the minimum length, and when a numeric variable is malformed or out
    /// of range.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        let mut config = Self::with_secret(jwt_secret)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Ok(url) = env::var("REDIS_URL") {
            config.redis_url = url;
        }
        if let Some(minutes) = parse_var("JWT_ACCESS_EXPIRATION_MINUTES")? {
            config.access_token_minutes = in_range(
                "JWT_ACCESS_EXPIRATION_MINUTES",
                minutes,
                MAX_ACCESS_TOKEN_MINUTES,
            )?;
        }
        if let Some(days) = parse_var("JWT_REFRESH_EXPIRATION_DAYS")? {
            config.refresh_token_days =
                in_range("JWT_REFRESH_EXPIRATION_DAYS", days, MAX_REFRESH_TOKEN_DAYS)?;
        }
        config.google_client_id = env::var("GOOGLE_CLIENT_ID").ok().filter(|v| !v.is_empty());
        if let Ok(host) = env::var("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = parse_var("SERVER_PORT")? {
            config.server_port = port;
        }

        Ok(config)
    }

    /// Default configuration around the given signing secret.
    pub fn with_secret(jwt_secret: impl Into<String>) -> AppResult<Self> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            redis_url: DEFAULT_REDIS_URL.to_string(),
            jwt_secret,
            access_token_minutes: DEFAULT_ACCESS_TOKEN_MINUTES,
            refresh_token_days: DEFAULT_REFRESH_TOKEN_DAYS,
            google_client_id: None,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse an optional variable; present but malformed is an error
fn parse_var<T: std::str::FromStr>(name: &str) -> AppResult<Option<T>> {
    env::var(name)
        .ok()
        .map(|raw| parse_value(name, &raw))
        .transpose()
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::internal(format!("{} has an invalid value: {:?}", name, raw)))
}

fn in_range(name: &str, value: i64, max: i64) -> AppResult<i64> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::internal(format!(
            "{} must be between 1 and {}, got {}",
            name, max, value
        )))
    }
}
