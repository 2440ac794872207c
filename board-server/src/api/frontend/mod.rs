//! Frontend monitor API module
//!
//! Same data as the public endpoints but with the POS wire trace
//! included, plus the cache admin reset. Nested under `/frontend`.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/frontend", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/tables", get(handler::list))
        .route("/tables/{id}", get(handler::get_by_id))
        .route("/tables/{id}/prebill", post(handler::prebill))
        .route("/tables/{id}/close", post(handler::close_table))
        .route("/cache/reset", post(handler::reset_cache))
}
