//! In-memory cache backend for tests and cache-less development runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use wares_core::CacheError;

use super::traits::CacheBackend;

#[derive(Debug, Clone)]
struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

/// HashMap-backed cache with per-entry expiry.
///
/// Expired entries are dropped lazily on lookup; nothing sweeps the map
/// in the background.
#[derive(Debug, Default, Clone)]
pub struct MemoryCacheBackend {
    entries: Arc<RwLock<HashMap<String, MemoryEntry>>>,
}

impl MemoryCacheBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries, including ones that have expired but not yet
    /// been looked up.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop an entry outright. Test helper for simulating TTL expiry
    /// without waiting out the clock.
    pub fn evict(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| CacheError::Unavailable {
            reason: "cache lock poisoned".to_string(),
        })?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| CacheError::Unavailable {
            reason: "cache lock poisoned".to_string(),
        })?;
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
