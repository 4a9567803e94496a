//! Cache backend trait.

use std::time::Duration;

use async_trait::async_trait;
use wares_core::CacheError;

/// Pluggable cache backend.
///
/// Values are opaque strings (serialized entities); callers own
/// serialization. Entries expire after the TTL passed to `set`. The
/// read path never overwrites an existing entry; entries only expire.
///
/// Implementations must be safe for concurrent use: every operation is
/// individually atomic at single-key granularity, so callers need no
/// locking around the backend.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Look up a raw value. `Ok(None)` is a miss.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a raw value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
