//! Redis cache backend.
//!
//! Uses a multiplexed async connection shared by all callers; every
//! operation is a single Redis command, atomic at single-key
//! granularity, so no client-side locking is needed.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use wares_core::CacheError;

use super::traits::CacheBackend;

/// Redis-backed cache using `SET key value EX ttl` for expiry.
#[derive(Clone)]
pub struct RedisCacheBackend {
    client: Client,
}

impl RedisCacheBackend {
    /// Create a backend from a connection URL, e.g.
    /// `redis://localhost:6379`.
    pub fn new(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url).map_err(|e| CacheError::Unavailable {
            reason: format!("failed to create redis client: {e}"),
        })?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Unavailable {
                reason: format!("failed to get redis connection: {e}"),
            })
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> =
            conn.get(key)
                .await
                .map_err(|e| CacheError::OperationFailed {
                    reason: format!("redis GET failed: {e}"),
                })?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        conn.set_ex(key, value, ttl.as_secs())
            .await
            .map_err(|e| CacheError::OperationFailed {
                reason: format!("redis SET failed: {e}"),
            })
    }
}

impl std::fmt::Debug for RedisCacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheBackend").finish_non_exhaustive()
    }
}
