//! Current user endpoint

use axum::{response::IntoResponse, Json};
use serde::Serialize;

use super::{avatar, ApiResponse};

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub avatar: String,
    pub role: &'static str,
    pub status: &'static str,
}

/// GET /api/user/me
///
/// Always the demo admin; tokens are not inspected.
pub async fn get_me() -> impl IntoResponse {
    let user = UserProfile {
        id: "user-1",
        name: "Alice Johnson",
        email: "alice@example.com",
        avatar: avatar("Alice"),
        role: "admin",
        status: "online",
    };

    Json(ApiResponse::new(user))
}
