//! WARES API Server Entry Point
//!
//! Bootstraps configuration, verifies database connectivity with a
//! bounded backoff probe, and starts the Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tracing_subscriber::EnvFilter;
use wares_api::{create_api_router, ApiConfig, ApiError, ApiResult, DbClient, DbConfig};
use wares_storage::RedisCacheBackend;

#[tokio::main]
async fn main() -> ApiResult<()> {
    init_tracing();

    let api_config = ApiConfig::from_env();
    let db_config = DbConfig::from_env();

    let db = DbClient::from_config(&db_config)
        .map_err(|e| ApiError::database_error(e.to_string()))?;

    db.ping_with_backoff(api_config.db_probe_attempts, api_config.db_probe_base_delay)
        .await
        .map_err(|e| ApiError::database_error(e.to_string()))?;

    let cache = Arc::new(
        RedisCacheBackend::new(&api_config.redis_url)
            .map_err(|e| ApiError::internal_error(format!("failed to create cache: {e}")))?,
    );

    let app: Router = create_api_router(db, cache);

    let addr: SocketAddr = api_config
        .bind_addr()
        .parse()
        .map_err(|e| ApiError::internal_error(format!("invalid bind address: {e}")))?;
    tracing::info!(%addr, "starting WARES API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("failed to bind {addr}: {e}")))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("server error: {e}")))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("wares_api=debug,tower_http=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
