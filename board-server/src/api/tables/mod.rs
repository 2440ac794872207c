//! Tables API module

mod handler;

pub use handler::TablesQuery;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/tables", get(handler::list))
        .route("/tables/{id}", get(handler::get_by_id))
        .route("/tables/{id}/message", get(handler::build_message))
        .route("/tables/{id}/payment", get(handler::set_payment_status))
        .route("/tables/{id}/close", get(handler::close_table))
}
