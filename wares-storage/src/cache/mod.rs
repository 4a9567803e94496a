//! Cache layer: pluggable TTL'd key-value backends.
//!
//! Entries are advisory. Absence or staleness never causes a
//! correctness failure, only a store round-trip.

pub mod key;
pub mod memory;
pub mod redis;
pub mod traits;

pub use key::GoodsCacheKey;
pub use memory::MemoryCacheBackend;
pub use redis::RedisCacheBackend;
pub use traits::CacheBackend;
