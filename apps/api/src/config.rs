//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The token signing secret has no default: a server without one
//! refuses to start.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server port
    pub port: u16,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Secret key for signing identity tokens
    pub jwt_private_key: String,

    /// Identity token lifetime in seconds
    pub jwt_lifetime_secs: i64,

    /// Default tracing filter, used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    ///
    /// ## Example
    /// ```rust
    /// use reel_api::config::AppConfig;
    ///
    /// let config = AppConfig::from_lookup(|key| match key {
    ///     "REEL_JWT_PRIVATE_KEY" => Some("s3cret".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.port, 3000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_private_key = lookup("REEL_JWT_PRIVATE_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("REEL_JWT_PRIVATE_KEY".to_string()))?;

        let jwt_lifetime_secs: i64 = parse_or(&lookup, "REEL_JWT_LIFETIME_SECS", 86_400)?; // 1 day
        if jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("REEL_JWT_LIFETIME_SECS".to_string()));
        }

        let db_max_connections: u32 = parse_or(&lookup, "REEL_DB_MAX_CONNECTIONS", 5)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("REEL_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(AppConfig {
            port: parse_or(&lookup, "REEL_PORT", 3000)?,
            db_path: lookup("REEL_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./reelhouse.db")),
            db_max_connections,
            jwt_private_key,
            jwt_lifetime_secs,
            log_filter: lookup("REEL_LOG_FILTER")
                .unwrap_or_else(|| "info,reel=debug,sqlx=warn".to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
