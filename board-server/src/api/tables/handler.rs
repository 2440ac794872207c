//! Tables API Handlers

use std::path::Path as FilePath;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use shared::TableDetail;

use crate::cache::TablesResponse;
use crate::core::ServerState;
use crate::pipeline::{BoardMessage, OrderPipeline};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct TablesQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// Outcome of a delegated POS action
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub status: String,
    pub response: String,
}

/// GET /tables - cached table list with optional pagination
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TablesQuery>,
) -> AppResult<Json<TablesResponse>> {
    let response = state
        .cache
        .list_tables(state.pos.as_ref(), query.page, query.page_size, false)
        .await?;
    Ok(Json(response))
}

/// GET /tables/:id - cached table content
///
/// The trace is fetched and cached alongside so a later monitor request
/// does not need a second POS round trip; the body stays trace-free.
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TableDetail>> {
    let snapshot = state
        .cache
        .get_table_detail(state.pos.as_ref(), id, true)
        .await?;
    Ok(Json(snapshot.table))
}

/// GET /tables/:id/message - consolidate the table order into a message
pub async fn build_message(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BoardMessage>> {
    let snapshot = state
        .cache
        .get_table_detail(state.pos.as_ref(), id, true)
        .await?;
    if snapshot.table.content.is_empty() {
        return Err(AppError::not_found("Table content not found."));
    }

    let file_path = FilePath::new(&state.config.message_dir).join(format!("comanda_{}.txt", id));
    let pipeline = OrderPipeline::new(state.chat.clone(), state.config.language.clone());
    let message = pipeline.run(id, &snapshot.table.content, &file_path).await?;
    Ok(Json(message))
}

/// GET /tables/:id/payment - issue a prebill on the POS
pub async fn set_payment_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ActionResponse>> {
    let payload = state.pos.prebill(id, false).await?;
    Ok(Json(ActionResponse {
        status: "Payment status set successfully".to_string(),
        response: payload.result,
    }))
}

/// GET /tables/:id/close - close the table after payment
pub async fn close_table(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ActionResponse>> {
    let payload = state.pos.close_table(id, false).await?;
    Ok(Json(ActionResponse {
        status: "Table closed successfully".to_string(),
        response: payload.result,
    }))
}
