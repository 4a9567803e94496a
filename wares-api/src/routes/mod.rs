//! REST Routes Module
//!
//! Thin transport adapters over the data-access layer:
//! - Goods CRUD routes
//! - Health check endpoints (Kubernetes-compatible)

pub mod goods;
pub mod health;

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use wares_storage::CacheBackend;

use crate::cached_store::CachedStore;
use crate::db::DbClient;

pub use goods::create_router as goods_router;
pub use health::create_router as health_router;

/// Assemble the production router: goods CRUD plus health probes, with
/// request tracing.
pub fn create_api_router<C>(db: DbClient, cache: Arc<C>) -> Router
where
    C: CacheBackend + 'static,
{
    let data = CachedStore::new(Arc::new(db.clone()), cache);

    Router::new()
        .nest("/goods", goods_router(data))
        .nest("/health", health_router(db))
        .layer(TraceLayer::new_for_http())
}
