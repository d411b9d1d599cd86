use anyhow::{ensure, Result};
use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HMAC signing secret. `None` when unset or empty.
    pub jwt_secret: Option<String>,
    pub environment: String,
    pub admins_table: String,
    pub articles_table: String,
    pub cors_origin: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());
        ensure!(
            cors_origin.starts_with("http://") || cors_origin.starts_with("https://"),
            "CORS_ORIGIN must be an http(s) origin, got {cors_origin}"
        );

        Ok(Self {
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()),
            environment: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            admins_table: lookup("ADMINS_TABLE").unwrap_or_else(|| "admins".to_string()),
            articles_table: lookup("ARTICLES_TABLE").unwrap_or_else(|| "articles".to_string()),
            cors_origin,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}
