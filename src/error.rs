//! Error types for the URL service
//!
//! Provides unified error handling using thiserror. Only the HTTP request
//! surface can fail: malformed asset references and out-of-range transform
//! parameters. The cache itself never errors; a value it will not hold is
//! rebuilt by the handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Api Error Enum ==
/// Unified error type for the URL service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Asset reference could not be parsed
    #[error("Invalid asset reference: {0}")]
    InvalidAsset(String),

    /// Transform parameters out of range or unparseable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidAsset(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the URL service.
pub type Result<T> = std::result::Result<T, ApiError>;
