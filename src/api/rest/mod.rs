//! REST API module for HTTP endpoints
//!
//! Static dashboard data plus the mock auth flow:
//! - `POST /api/auth/{login,register,logout}`
//! - `GET /api/dashboard`, `GET /api/dashboard/metrics`
//! - `GET /api/chat/channels`, `GET /api/chat/channels/:channelId/messages`
//! - `GET /api/chat/presence` - live snapshot from the presence registry
//! - `GET /api/user/me`

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod user;

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;
use tracing::debug;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Request body read as JSON or as a urlencoded form.
///
/// An absent or unreadable body yields `T::default()`, so handlers report
/// missing fields through their own validation instead of a rejection.
#[derive(Debug, Default)]
pub struct RequestBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for RequestBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let body = if is_form {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .map_err(|e| e.body_text())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(body)| body)
                .map_err(|e| e.body_text())
        };

        Ok(RequestBody(body.unwrap_or_else(|reason| {
            debug!("Ignoring request body: {}", reason);
            T::default()
        })))
    }
}

/// Avatar URL for a seed name
pub(crate) fn avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", seed)
}
