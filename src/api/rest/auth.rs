//! Mock authentication endpoints
//!
//! Credentials are only checked for presence; any non-empty email and
//! password log in as the demo admin.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use super::{ApiResponse, RequestBody};
use crate::api::websocket::state::AppState;
use crate::auth::AuthUser;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Body of a successful login or registration
#[derive(Debug, Serialize)]
pub struct Session {
    pub user: AuthUser,
    pub token: String,
}

/// Treats missing and empty strings alike
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    RequestBody(body): RequestBody<LoginRequest>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let (Some(email), Some(_password)) = (present(&body.email), present(&body.password)) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let user = AuthUser {
        id: "user-1".to_string(),
        name: "Alice Johnson".to_string(),
        email: email.to_string(),
        role: "admin".to_string(),
    };

    let token = state
        .tokens
        .issue(&user)
        .map_err(|_| ApiError::internal("Login failed"))?;

    info!("Issued token for {}", user.email);
    Ok(Json(ApiResponse::new(Session { user, token })))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    RequestBody(body): RequestBody<RegisterRequest>,
) -> Result<Json<ApiResponse<Session>>, ApiError> {
    let (Some(name), Some(email), Some(_password)) = (
        present(&body.name),
        present(&body.email),
        present(&body.password),
    ) else {
        return Err(ApiError::bad_request(
            "Name, email, and password are required",
        ));
    };

    let user = AuthUser {
        id: format!("user-{}", chrono::Utc::now().timestamp_millis()),
        name: name.to_string(),
        email: email.to_string(),
        role: "user".to_string(),
    };

    let token = state
        .tokens
        .issue(&user)
        .map_err(|_| ApiError::internal("Registration failed"))?;

    info!("Registered {} as {}", user.email, user.id);
    Ok(Json(ApiResponse::new(Session { user, token })))
}

/// POST /api/auth/logout
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}
