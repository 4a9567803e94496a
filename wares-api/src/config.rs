//! API Configuration Module
//!
//! Server-level settings loaded from environment variables with
//! development defaults. Database pool settings live in
//! [`crate::db::DbConfig`].

use std::time::Duration;

/// API configuration for the HTTP listener and cache client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host for the HTTP listener.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Redis connection URL for the read cache.
    pub redis_url: String,
    /// Attempts for the startup database probe.
    pub db_probe_attempts: u32,
    /// Base delay for the probe backoff; doubles per attempt.
    pub db_probe_base_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            redis_url: "redis://localhost:6379".to_string(),
            db_probe_attempts: 6,
            db_probe_base_delay: Duration::from_millis(100),
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `WARES_BIND`: bind host (default: 0.0.0.0)
    /// - `PORT` or `WARES_PORT`: bind port (default: 8080)
    /// - `WARES_REDIS_URL`: Redis URL (default: redis://localhost:6379)
    /// - `WARES_DB_PROBE_ATTEMPTS`: startup probe attempts (default: 6)
    /// - `WARES_DB_PROBE_BASE_DELAY_MS`: probe base delay (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("WARES_BIND").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .or_else(|| std::env::var("WARES_PORT").ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            redis_url: std::env::var("WARES_REDIS_URL").unwrap_or(defaults.redis_url),
            db_probe_attempts: std::env::var("WARES_DB_PROBE_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.db_probe_attempts),
            db_probe_base_delay: Duration::from_millis(
                std::env::var("WARES_DB_PROBE_BASE_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.db_probe_base_delay.as_millis() as u64),
            ),
        }
    }

    /// The `host:port` pair the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
