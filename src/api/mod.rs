//! API module for HTTP and WebSocket endpoints
//!
//! REST routes serve the dashboard's static data; the WebSocket endpoint
//! carries presence and chat traffic.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::AppState;
