//! Chat endpoints - channel list, canned history, live presence

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, SecondsFormat, Utc};
use serde::Serialize;

use super::{avatar, ApiResponse};
use crate::api::websocket::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatChannel {
    pub id: &'static str,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub unread_count: u32,
    pub last_message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: &'static str,
    pub content: &'static str,
    pub user_id: &'static str,
    pub user_name: &'static str,
    pub user_avatar: String,
    pub timestamp: String,
    pub mentions: Vec<&'static str>,
    pub channel: String,
}

/// GET /api/chat/channels
pub async fn list_channels() -> impl IntoResponse {
    let channels = vec![
        ChatChannel {
            id: "channel-1",
            name: "general",
            kind: "public",
            unread_count: 0,
            last_message: "Welcome to general chat",
        },
        ChatChannel {
            id: "channel-2",
            name: "support-team",
            kind: "public",
            unread_count: 3,
            last_message: "Did we resolve the customer issue?",
        },
        ChatChannel {
            id: "channel-3",
            name: "announcements",
            kind: "public",
            unread_count: 0,
            last_message: "New feature released: Advanced reporting",
        },
    ];

    Json(ApiResponse::new(channels))
}

/// GET /api/chat/channels/:channelId/messages
///
/// Three canned messages, stamped into `channelId` and spaced five minutes
/// apart starting an hour ago.
pub async fn list_messages(Path(channel_id): Path<String>) -> impl IntoResponse {
    let now = Utc::now();
    let minutes_ago = |minutes: i64| {
        (now - Duration::minutes(minutes)).to_rfc3339_opts(SecondsFormat::Millis, true)
    };

    let messages = vec![
        ChatMessage {
            id: "msg-1",
            content: "Hey team, how is the ticket backlog looking?",
            user_id: "user-1",
            user_name: "Alice Johnson",
            user_avatar: avatar("Alice"),
            timestamp: minutes_ago(60),
            mentions: vec![],
            channel: channel_id.clone(),
        },
        ChatMessage {
            id: "msg-2",
            content: "Pretty good! We've resolved 156 tickets this week",
            user_id: "user-2",
            user_name: "Bob Smith",
            user_avatar: avatar("Bob"),
            timestamp: minutes_ago(55),
            mentions: vec!["user-1"],
            channel: channel_id.clone(),
        },
        ChatMessage {
            id: "msg-3",
            content: "That's great! Keep up the good work everyone",
            user_id: "user-1",
            user_name: "Alice Johnson",
            user_avatar: avatar("Alice"),
            timestamp: minutes_ago(50),
            mentions: vec![],
            channel: channel_id,
        },
    ];

    Json(ApiResponse::new(messages))
}

/// GET /api/chat/presence - who is joined right now
pub async fn get_presence(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::new(state.online_users()))
}
