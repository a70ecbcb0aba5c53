//! DeskSOS Server
//!
//! Mock backend for a support-desk dashboard: static REST endpoints plus a
//! real-time presence and chat relay over WebSocket.
//!
//! # Modules
//!
//! - `presence`: participant registry, channel hub, and the relay coordinator
//! - `api`: Axum router, REST handlers, and the WebSocket transport
//! - `auth`: JWT issuing for the mock login flow
//! - `config`: environment-based configuration
//! - `error`: error types
//!
//! # Example
//!
//! ```no_run
//! use desksos_server::{create_router, AppState, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let app = create_router(AppState::shared(config.clone())?);
//!     let listener = tokio::net::TcpListener::bind(config.bind_addr()?).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod presence;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{ApiError, AuthError, ConfigError, RelayError};
pub use presence::{ChannelHub, ChannelId, PresenceCoordinator, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
