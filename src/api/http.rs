//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{auth, chat, dashboard, user};
use super::websocket::{handler::ws_handler, state::AppState};
use crate::presence::events::names;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(api_index))
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // REST API endpoints
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/dashboard/metrics", get(dashboard::get_metrics))
        .route("/api/chat/channels", get(chat::list_channels))
        .route(
            "/api/chat/channels/:channel_id/messages",
            get(chat::list_messages),
        )
        .route("/api/chat/presence", get(chat::get_presence))
        .route("/api/user/me", get(user::get_me))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    }))
}

/// Endpoint map for humans poking at the server
async fn api_index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "message": "DeskSOS Enterprise API Server",
        "version": crate::VERSION,
        "endpoints": {
            "health": "/health",
            "dashboard": {
                "data": "GET /api/dashboard",
                "metrics": "GET /api/dashboard/metrics"
            },
            "chat": {
                "channels": "GET /api/chat/channels",
                "messages": "GET /api/chat/channels/:channelId/messages",
                "presence": "GET /api/chat/presence"
            },
            "auth": {
                "login": "POST /api/auth/login",
                "register": "POST /api/auth/register",
                "logout": "POST /api/auth/logout"
            },
            "user": {
                "profile": "GET /api/user/me"
            }
        },
        "websocket": {
            "url": format!("ws://localhost:{}/ws", state.config.port),
            "events": {
                "user_join": names::JOIN,
                "message_send": names::MESSAGE_SEND,
                "message_new": names::MESSAGE_NEW,
                "user_typing": names::TYPING,
                "user_typing_stop": names::TYPING_STOP,
                "presence_update": names::PRESENCE_UPDATE
            }
        }
    }))
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "path": uri.path(),
            "method": method.as_str(),
            "message": "Endpoint does not exist. See GET / for available endpoints."
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::util::ServiceExt;

    fn app() -> Router {
        create_router(AppState::shared(Config::default()).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/nothing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/api/nothing");
        assert_eq!(body["method"], "DELETE");
    }

    #[tokio::test]
    async fn test_index_lists_websocket_events() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["websocket"]["url"], "ws://localhost:5000/ws");
        assert_eq!(body["websocket"]["events"]["user_join"], "user:join");
    }
}
