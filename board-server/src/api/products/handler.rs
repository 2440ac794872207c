//! Products API Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct LoadProductsResponse {
    pub status: String,
    pub count: usize,
}

/// POST /load/products - delegate a product reload to the POS
pub async fn load(State(state): State<ServerState>) -> AppResult<Json<LoadProductsResponse>> {
    let products = state.pos.load_products().await?;
    tracing::info!(count = products.len(), "Products loaded from POS");
    Ok(Json(LoadProductsResponse {
        status: "Products loaded".to_string(),
        count: products.len(),
    }))
}
