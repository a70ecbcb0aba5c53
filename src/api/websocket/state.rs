//! Shared application state

use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::Config;
use crate::error::AuthError;
use crate::presence::{shared_coordinator, OnlineUser, SharedCoordinator};

/// State handed to every HTTP and WebSocket handler
pub struct AppState {
    /// Presence registry and channel hub
    pub presence: SharedCoordinator,

    /// Signs tokens for the auth endpoints
    pub tokens: TokenIssuer,

    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::new(&config.jwt_secret, config.token_ttl)?;

        Ok(Self {
            presence: shared_coordinator(),
            tokens,
            config,
        })
    }

    /// Convenience constructor for handlers and tests
    pub fn shared(config: Config) -> Result<Arc<Self>, AuthError> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Snapshot of joined participants
    pub fn online_users(&self) -> Vec<OnlineUser> {
        self.presence.lock().online_users()
    }

    /// Number of open socket channels, joined or not
    pub fn connected_channels(&self) -> usize {
        self.presence.lock().connected_channels()
    }
}
