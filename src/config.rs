//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Lifetime of a mock record after its most recent write (7 days).
pub const RECORD_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// Which key-value backend holds the mock records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// External Redis server
    Redis,
    /// In-process map, lost on restart
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redis" => Some(Self::Redis),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis address, `host[:port]` or a full `redis://` URL
    pub redis_url: String,
    /// Redis password, empty for none
    pub redis_password: String,
    /// HTTP server port
    pub server_port: u16,
    /// Bearer credential required on PUT; `None` disables the check
    pub auth_key: Option<String>,
    /// Backend used for mock records
    pub store_backend: StoreBackend,
    /// Deadline for a single store call in milliseconds
    pub store_timeout_ms: u64,
    /// Memory-store sweep interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis address (default: localhost:6379)
    /// - `REDIS_PASS` - Redis password (default: empty)
    /// - `PORT` - HTTP server port (default: 1323)
    /// - `AUTH_KEY` - Write credential (default: unset; empty counts as unset)
    /// - `MOCK_STORE` - `redis` or `memory` (default: redis)
    /// - `STORE_TIMEOUT_MS` - Store call deadline (default: 5000)
    /// - `CLEANUP_INTERVAL` - Memory-store sweep frequency in seconds (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    ///
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            redis_url: lookup("REDIS_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.redis_url),
            redis_password: lookup("REDIS_PASS").unwrap_or(defaults.redis_password),
            server_port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            auth_key: lookup("AUTH_KEY").filter(|v| !v.is_empty()),
            store_backend: lookup("MOCK_STORE")
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(defaults.store_backend),
            store_timeout_ms: lookup("STORE_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(defaults.store_timeout_ms),
            cleanup_interval: lookup("CLEANUP_INTERVAL")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cleanup_interval),
        }
    }

    /// Record TTL applied to every write.
    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(RECORD_TTL_SECS)
    }

    /// Deadline for a single store call.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: "localhost:6379".to_string(),
            redis_password: String::new(),
            server_port: 1323,
            auth_key: None,
            store_backend: StoreBackend::Redis,
            store_timeout_ms: 5000,
            cleanup_interval: 60,
        }
    }
}
