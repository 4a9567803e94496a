//! WARES Storage - storage seam and cache backends.
//!
//! Defines the `GoodsRepository` trait (the durable-store seam), the
//! `CacheBackend` trait with its Redis and in-memory implementations,
//! and the deterministic cache key. The PostgreSQL repository lives in
//! `wares-api`; the in-memory repository here backs tests and demos.

pub mod cache;
pub mod repository;

pub use cache::{CacheBackend, GoodsCacheKey, MemoryCacheBackend, RedisCacheBackend};
pub use repository::{GoodsRepository, MemoryGoodsRepository};
