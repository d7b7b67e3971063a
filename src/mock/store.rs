//! Mock Store Client
//!
//! Get/set-with-expiry over the fingerprint key space, plus the Redis backend.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, IntoConnectionInfo};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::error::MockError;
use crate::mock::Fingerprint;

// == Store Error ==
/// Transport-level failure talking to the key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Address could not be turned into connection parameters
    #[error("invalid store address: {0}")]
    InvalidAddress(String),

    /// Store unreachable or returned an error
    #[error("store operation failed: {0}")]
    Transport(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(e: redis::RedisError) -> Self {
        StoreError::Transport(e.to_string())
    }
}

impl From<StoreError> for MockError {
    fn from(e: StoreError) -> Self {
        MockError::StoreUnavailable(e.to_string())
    }
}

/// Convenience Result type for store calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// == Mock Store Trait ==
/// Key-value service holding mock records.
///
/// `Ok(None)` from `get` means the record was never written or has expired;
/// it is not an error. Implementations make a single attempt per call.
#[async_trait]
pub trait MockStore: Send + Sync {
    /// Fetches the record stored under `key`.
    async fn get(&self, key: &Fingerprint) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous record and resetting its TTL.
    async fn set(&self, key: &Fingerprint, value: String, ttl: Duration) -> StoreResult<()>;
}

// == Redis Store ==
/// Redis-backed store. Opens a multiplexed connection per call.
#[derive(Debug, Clone)]
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    /// Wraps an existing Redis client.
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Builds a client from `REDIS_URL`/`REDIS_PASS` settings.
    ///
    /// No connection is made until the first call.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let url = if config.redis_url.contains("://") {
            config.redis_url.clone()
        } else {
            format!("redis://{}", config.redis_url)
        };

        let mut info = url
            .as_str()
            .into_connection_info()
            .map_err(|e| StoreError::InvalidAddress(e.to_string()))?;
        if !config.redis_password.is_empty() {
            info.redis.password = Some(config.redis_password.clone());
        }

        let client =
            redis::Client::open(info).map_err(|e| StoreError::InvalidAddress(e.to_string()))?;
        Ok(Self::new(client))
    }

    #[cfg(test)]
    fn connection_info(&self) -> &redis::ConnectionInfo {
        self.client.get_connection_info()
    }
}

#[async_trait]
impl MockStore for RedisStore {
    async fn get(&self, key: &Fingerprint) -> StoreResult<Option<String>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key.as_str()).await?;
        debug!(key = %key, found = value.is_some(), "redis GET");
        Ok(value)
    }

    async fn set(&self, key: &Fingerprint, value: String, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(key.as_str(), value, ttl.as_secs()).await?;
        debug!(key = %key, ttl_secs = ttl.as_secs(), "redis SET");
        Ok(())
    }
}
