//! Server configuration from environment.

use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "plain" | "text" | "pretty" => Some(Self::Plain),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Bearer token for the admin API.
    pub admin_token: String,
    /// Message written to the store at startup, if set.
    pub server_message: Option<String>,
    pub log_format: LogFormat,
    /// Minimum status queries per second the load test accepts.
    pub loadtest_min_rate: f64,
}

pub const DEFAULT_ADMIN_TOKEN: &str = "change-me-admin-token";

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("INTEROP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            database_path: env::var("INTEROP_DATABASE_PATH")
                .unwrap_or_else(|_| "data/interop.db".to_string()),
            database_max_connections: env::var("INTEROP_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8),
            admin_token: env::var("INTEROP_ADMIN_TOKEN")
                .unwrap_or_else(|_| DEFAULT_ADMIN_TOKEN.to_string()),
            server_message: env::var("INTEROP_SERVER_MESSAGE")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            log_format: env::var("INTEROP_LOG_FORMAT")
                .ok()
                .and_then(|s| LogFormat::parse(&s))
                .unwrap_or(LogFormat::Plain),
            loadtest_min_rate: env::var("INTEROP_LOADTEST_MIN_RATE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100.0),
        }
    }
}
