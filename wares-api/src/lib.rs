//! WARES API - data access and REST layer for the goods catalog.
//!
//! Composes the PostgreSQL store with the Redis read cache behind
//! [`CachedStore`] and exposes the catalog over an Axum router. The
//! routes are thin adapters: input parsing and status-code mapping live
//! here, while the catalog semantics live in the data-access layer.

pub mod cached_store;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod types;

pub use cached_store::{CachedStore, CACHE_TTL};
pub use config::ApiConfig;
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::create_api_router;
pub use types::DeleteGoodsResponse;
