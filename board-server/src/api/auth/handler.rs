//! Auth API Handlers

use std::time::Instant;

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct ValidateAuthResponse {
    pub is_authenticated: bool,
    /// Seconds spent validating the token
    pub response_time: f64,
}

/// GET /auth/validate - check whether a valid POS token can be presented
pub async fn validate(State(state): State<ServerState>) -> AppResult<Json<ValidateAuthResponse>> {
    let started = Instant::now();
    let is_authenticated = state.tokens.is_authenticated().await;
    Ok(Json(ValidateAuthResponse {
        is_authenticated,
        response_time: started.elapsed().as_secs_f64(),
    }))
}
