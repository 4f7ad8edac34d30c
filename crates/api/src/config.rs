//! Server settings read once at startup.
//!
//! | Variable | Meaning | When unset |
//! |----------|---------|------------|
//! | `DATABASE_URL` | Postgres connection string | startup fails |
//! | `DATABASE_MAX_CONNECTIONS` | pool size | 5 |
//! | `API_HOST` / `API_PORT` | listen address | `0.0.0.0:3000` |
//! | `LOG_LEVEL` | `trace` to `error`, case-insensitive | `info` |
//! | `API_CORS_ORIGINS` | comma-separated origins allowed cross-site | no CORS layer |
//! | `API_REQUEST_TIMEOUT_SECONDS` | per-request deadline, answered with 408 | 30 |
//!
//! The binaries call `dotenv` first, so a `.env` file in the working
//! directory can supply any of these.

use eyre::{Result, WrapErr};
use std::env;
use tracing::Level;

/// Listen address, storage and transport settings for the booking API.
///
/// ```no_run
/// # use salonbook_api::config::ApiConfig;
/// # fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// assert!(config.database_max_connections > 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    /// Ceiling for the global `tracing` subscriber.
    pub log_level: Level,
    /// `None` leaves cross-origin requests unanswered.
    pub cors_origins: Option<Vec<String>>,
    /// Seconds before an in-flight request is abandoned.
    pub request_timeout: u64,
}

impl ApiConfig {
    /// # Errors
    ///
    /// Fails without `DATABASE_URL`, or when the port or pool size is not a
    /// number. A malformed timeout silently falls back to 30 seconds.
    pub fn from_env() -> Result<Self> {
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?;

        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_default());

        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins));

        let request_timeout = env::var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Ok(Self {
            host,
            port,
            database_url,
            database_max_connections,
            log_level,
            cors_origins,
            request_timeout,
        })
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Blank entries between commas are skipped.
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect()
}

/// Unknown or empty values fall back to `INFO`.
pub fn parse_log_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
