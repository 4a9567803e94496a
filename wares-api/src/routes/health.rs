//! Health Check Endpoints
//!
//! Kubernetes-compatible probes:
//! - /health/ping - simple liveness check
//! - /health/ready - database connectivity check
//!
//! No authentication required for health endpoints.

use std::sync::Arc;

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::DbClient;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Clone)]
pub struct HealthState {
    pub db: DbClient,
}

async fn ping() -> impl IntoResponse {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        error: None,
    })
}

async fn ready(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: HealthStatus::Healthy,
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: HealthStatus::Unhealthy,
                error: Some(e.to_string()),
            }),
        ),
    }
}

/// Create the health routes router.
pub fn create_router(db: DbClient) -> Router {
    let state = Arc::new(HealthState { db });

    Router::new()
        .route("/ping", get(ping))
        .route("/ready", get(ready))
        .with_state(state)
}
