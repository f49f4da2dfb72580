//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Roster unavailable: {0}")]
    Roster(String),

    #[error("Alert delivery failed: {0}")]
    Dispatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, 10001, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, 10002, msg.clone()),
            AppError::Roster(msg) => {
                tracing::error!("Roster error: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, 10003, "Roster unavailable".into())
            }
            AppError::Dispatch(msg) => {
                tracing::error!("Dispatch error: {}", msg);
                (StatusCode::BAD_GATEWAY, 10004, "Alert delivery failed".into())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, 10000, "Internal server error".into())
            }
        };

        let body = ErrorResponse { code, message };

        (status, Json(body)).into_response()
    }
}
