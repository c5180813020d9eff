// src/server/response.rs
use crate::utils::error::UpstreamError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request-level failure, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Maps an upstream failure for the action described by `action`
    /// (e.g. "fetch company data").
    pub fn upstream(action: &str, err: UpstreamError) -> Self {
        match err {
            UpstreamError::InvalidSymbol(_) => Self::bad_request("Invalid stock symbol"),
            other => {
                tracing::error!("Failed to {}: {}", action, other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Failed to {}: {}", action, other),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
