//! Error handling for the JSON API

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::error::ServerError;

/// API error rendered as `{"error": {"code", "message"}}`
#[derive(Debug)]
pub enum ApiError {
    /// Wrapped server error
    ServerError(ServerError),
}

impl From<ServerError> for ApiError {
    fn from(err: ServerError) -> Self {
        ApiError::ServerError(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::ServerError(err) => write!(f, "Server Error: {}", err),
        }
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::ServerError(err) => match err {
                ServerError::ValidationError(msg) => {
                    (StatusCode::BAD_REQUEST, "ERR_VALIDATION_ERROR", msg.clone())
                }
                ServerError::EmbeddingError(_) | ServerError::VectorStoreError(_) => {
                    (StatusCode::BAD_GATEWAY, "ERR_UPSTREAM_ERROR", err.to_string())
                }
                ServerError::ConfigError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "ERR_CONFIG_ERROR", err.to_string())
                }
                ServerError::InternalError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "ERR_INTERNAL_SERVER_ERROR", err.to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = self.parts();
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}
