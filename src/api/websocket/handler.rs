//! WebSocket connection handler

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::state::AppState;
use crate::presence::{ChannelId, ClientFrame, OutboundEvent};

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<OutboundEvent>();

    let channel = state.presence.lock().connect(tx);
    info!("User connected: {}", channel);

    // Forward coordinator output to the socket
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize {}: {}", event.name(), e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json)).await.is_err() {
                break; // Client disconnected
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(msg) => {
                if !handle_client_message(msg, channel, &state) {
                    break; // Client requested close
                }
            }
            Err(e) => {
                warn!("WebSocket error on {}: {}", channel, e);
                break;
            }
        }
    }

    state.presence.lock().close(channel);
    send_task.abort();
    info!("User disconnected: {}", channel);
}

/// Handle a message from the client
/// Returns false if the connection should be closed
fn handle_client_message(msg: Message, channel: ChannelId, state: &AppState) -> bool {
    match msg {
        Message::Text(text) => {
            match serde_json::from_str::<ClientFrame>(&text) {
                Ok(frame) => state.presence.lock().dispatch(channel, frame),
                Err(e) => warn!("Undecodable frame from {}: {}", channel, e),
            }
            true
        }
        Message::Binary(_) => {
            debug!("Ignoring binary frame from {}", channel);
            true
        }
        // axum answers pings itself
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => false,
    }
}
