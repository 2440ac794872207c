//! Frontend monitor API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::tables::TablesQuery;
use crate::cache::TablesResponse;
use crate::clients::{PosActionPayload, TableDetailPayload};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /frontend/tables - table list along with the POS wire trace
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TablesQuery>,
) -> AppResult<Json<TablesResponse>> {
    let response = state
        .cache
        .list_tables(state.pos.as_ref(), query.page, query.page_size, true)
        .await?;
    Ok(Json(response))
}

/// GET /frontend/tables/:id - table content plus trace metadata
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableDetailPayload>> {
    let snapshot = state
        .cache
        .get_table_detail(state.pos.as_ref(), id, true)
        .await?;
    Ok(Json(TableDetailPayload {
        table: snapshot.table,
        wire_trace: snapshot.wire_trace,
    }))
}

/// POST /frontend/tables/:id/prebill - prebill with the raw trace exposed
pub async fn prebill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PosActionPayload>> {
    let payload = state.pos.prebill(id, true).await?;
    Ok(Json(payload))
}

/// POST /frontend/tables/:id/close - close with the raw trace exposed
pub async fn close_table(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PosActionPayload>> {
    let payload = state.pos.close_table(id, true).await?;
    Ok(Json(payload))
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    pub table_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub status: String,
}

/// POST /frontend/cache/reset - clear cached snapshots
///
/// With `table_id` only that detail entry is dropped; without it both the
/// full-list slot and every detail entry are cleared.
pub async fn reset_cache(
    State(state): State<ServerState>,
    Query(query): Query<ResetQuery>,
) -> AppResult<Json<ResetResponse>> {
    match query.table_id {
        Some(id) => state.cache.reset_table_detail(Some(id)).await,
        None => {
            state.cache.reset_tables().await;
            state.cache.reset_table_detail(None).await;
        }
    }
    Ok(Json(ResetResponse {
        status: "Cache cleared".to_string(),
    }))
}
