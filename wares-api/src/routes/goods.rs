//! Goods REST Routes
//!
//! Axum handlers for the goods catalog. Handlers only parse input and
//! map results onto the wire; the catalog semantics (validation,
//! trimming, project checks, cache policy) live in `CachedStore`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use wares_core::{CreateGoods, UpdateGoods};
use wares_storage::{CacheBackend, GoodsRepository};

use crate::cached_store::CachedStore;
use crate::error::{ApiError, ApiResult};
use crate::types::{DeleteGoodsResponse, ProjectQuery};

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state for goods routes.
pub struct GoodsState<R, C> {
    pub data: CachedStore<R, C>,
}

// ============================================================================
// ROUTE HANDLERS
// ============================================================================

/// POST /goods?projectId=N - create a goods row
pub async fn create_goods<R, C>(
    State(state): State<Arc<GoodsState<R, C>>>,
    Query(query): Query<ProjectQuery>,
    Json(req): Json<CreateGoods>,
) -> ApiResult<impl IntoResponse>
where
    R: GoodsRepository,
    C: CacheBackend,
{
    if query.project_id <= 0 {
        return Err(ApiError::invalid_project_id());
    }

    let goods = state.data.create(query.project_id, &req).await?;
    Ok((StatusCode::CREATED, Json(goods)))
}

/// GET /goods/:id?projectId=N - fetch a goods row
pub async fn get_goods<R, C>(
    State(state): State<Arc<GoodsState<R, C>>>,
    Path(goods_id): Path<i64>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<impl IntoResponse>
where
    R: GoodsRepository,
    C: CacheBackend,
{
    let goods = state.data.get_by_id(query.project_id, goods_id).await?;
    Ok(Json(goods))
}

/// PATCH /goods/:id?projectId=N - merge changes into a goods row
pub async fn update_goods<R, C>(
    State(state): State<Arc<GoodsState<R, C>>>,
    Path(goods_id): Path<i64>,
    Query(query): Query<ProjectQuery>,
    Json(req): Json<UpdateGoods>,
) -> ApiResult<impl IntoResponse>
where
    R: GoodsRepository,
    C: CacheBackend,
{
    if query.project_id <= 0 {
        return Err(ApiError::invalid_project_id());
    }

    let goods = state.data.update(query.project_id, goods_id, &req).await?;
    Ok(Json(goods))
}

/// DELETE /goods/:id?projectId=N - soft-delete a goods row
pub async fn delete_goods<R, C>(
    State(state): State<Arc<GoodsState<R, C>>>,
    Path(goods_id): Path<i64>,
    Query(query): Query<ProjectQuery>,
) -> ApiResult<impl IntoResponse>
where
    R: GoodsRepository,
    C: CacheBackend,
{
    if query.project_id <= 0 {
        return Err(ApiError::invalid_project_id());
    }

    state.data.delete(query.project_id, goods_id).await?;
    Ok(Json(DeleteGoodsResponse {
        id: goods_id,
        project_id: query.project_id,
        removed: true,
    }))
}

// ============================================================================
// ROUTER SETUP
// ============================================================================

/// Create the goods routes router.
pub fn create_router<R, C>(data: CachedStore<R, C>) -> Router
where
    R: GoodsRepository + 'static,
    C: CacheBackend + 'static,
{
    let state = Arc::new(GoodsState { data });

    Router::new()
        .route("/", post(create_goods::<R, C>))
        .route(
            "/:id",
            get(get_goods::<R, C>)
                .patch(update_goods::<R, C>)
                .delete(delete_goods::<R, C>),
        )
        .with_state(state)
}
