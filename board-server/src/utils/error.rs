//! Unified error handling
//!
//! Provides the application error type and response structure:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response structure
//!
//! # Error code scheme
//!
//! | Prefix | Category | Example |
//! |--------|----------|---------|
//! | E3xxx  | Authentication | E3003 token expired |
//! | E0xxx  | Request/business | E0003 not found |
//! | E9xxx  | System/upstream | E9003 upstream protocol error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// API unified response structure
///
/// ```json
/// {
///   "code": "E0000",
///   "message": "Success",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    /// Message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum
///
/// Cache and pipeline operations raise these typed failures; the boundary
/// layer maps each to a stable status code and a safe message. System and
/// upstream variants log the full context here and never leak the original
/// message to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (4xx) ==========
    #[error("Token expired")]
    /// POS token invalid or expired (401)
    TokenExpired,

    // ========== Business logic errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Unknown table id or out-of-range page (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// Malformed pagination or request parameters (400)
    Validation(String),

    // ========== System errors (5xx) ==========
    #[error("Upstream protocol error: {0}")]
    /// Text-generation or POS bridge failure, never retried (502)
    Upstream(String),

    #[error("Configuration error: {0}")]
    /// Missing model name or credential (500)
    Configuration(String),

    #[error("Internal server error: {0}")]
    /// Catch-all (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Authentication errors (401)
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "E3003",
                "Smart Connect authentication error".to_string(),
            ),

            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),

            // Upstream failures (502)
            AppError::Upstream(msg) => {
                error!(target: "upstream", error = %msg, "Upstream protocol error");
                (
                    StatusCode::BAD_GATEWAY,
                    "E9003",
                    "Upstream service error".to_string(),
                )
            }

            // Configuration faults (500)
            AppError::Configuration(msg) => {
                error!(target: "config", error = %msg, "Configuration error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9004",
                    "Server configuration error".to_string(),
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an upstream protocol error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(format!("I/O error: {}", e))
    }
}
