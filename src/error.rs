//! Error types shared across the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors raised while relaying socket events
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("message payload must be a JSON object, got {0}")]
    InvalidPayload(&'static str),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}

/// Errors raised while issuing or validating tokens
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid secret: {0}")]
    InvalidSecret(String),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// REST error rendered as a JSON body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::BadRequest(message) => json!({ "error": message }),
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                json!({ "error": message, "status": status.as_u16() })
            }
        };
        (status, Json(body)).into_response()
    }
}
