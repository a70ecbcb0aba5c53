//! WebSocket transport for the presence coordinator
//!
//! Endpoint `GET /ws`. Frames are JSON text messages:
//! - client to server: `{"event": "...", "data": {...}, "ack": 1}`
//! - server to client: `{"event": "...", "data": {...}}`
//!
//! Each socket gets its own channel in the hub. Closing the socket (close
//! frame, read error, or EOF) runs the disconnect path.

pub mod handler;
pub mod state;

pub use handler::ws_handler;
pub use state::AppState;
