//! Presence & relay coordinator
//!
//! Owns the participant registry and reacts to inbound channel events:
//!
//! | Inbound            | Effect                                   | Audience          |
//! |--------------------|------------------------------------------|-------------------|
//! | `user:join`        | upsert registry, `presence:update`       | all               |
//! | `message:send`     | enrich with id/timestamp, `message:new`  | all               |
//! | `user:typing`      | `user:typing` if the user is registered  | all except sender |
//! | `user:typing:stop` | `user:typing:stop`                       | all except sender |
//! | disconnect         | remove bound entry, `presence:update`    | all               |
//!
//! Every handler runs to completion before the next event is taken, so the
//! registry needs no locking of its own. Callers share the coordinator
//! through [`SharedCoordinator`].

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::channel::{ChannelHub, ChannelId, ChannelSender, Transport};
use super::events::{
    AckResult, Acknowledgement, ClientFrame, InboundEvent, JoinRequest, MessageAck, OnlineUser,
    OutboundEvent, PresenceUpdate, TypingIndicator, TypingSignal, TypingStopSignal,
};
use super::registry::{Participant, Registry};
use crate::error::RelayError;

/// Coordinator shared between connection tasks
pub type SharedCoordinator = Arc<Mutex<PresenceCoordinator<ChannelHub>>>;

/// Create a coordinator backed by an empty [`ChannelHub`]
pub fn shared_coordinator() -> SharedCoordinator {
    Arc::new(Mutex::new(PresenceCoordinator::new(ChannelHub::new())))
}

/// Generates `msg-<unix millis>-<sequence>` ids, unique within a process run
#[derive(Debug, Default)]
struct MessageIdGenerator {
    sequence: u64,
}

impl MessageIdGenerator {
    fn next(&mut self, now: DateTime<Utc>) -> String {
        self.sequence += 1;
        format!("msg-{}-{}", now.timestamp_millis(), self.sequence)
    }
}

pub struct PresenceCoordinator<T: Transport> {
    registry: Registry,
    transport: T,
    message_ids: MessageIdGenerator,
}

impl<T: Transport> PresenceCoordinator<T> {
    pub fn new(transport: T) -> Self {
        Self {
            registry: Registry::new(),
            transport,
            message_ids: MessageIdGenerator::default(),
        }
    }

    /// Read-only `{id, name}` snapshot of the registry
    pub fn online_users(&self) -> Vec<OnlineUser> {
        self.registry.snapshot()
    }

    pub fn online_count(&self) -> usize {
        self.registry.len()
    }

    /// Bind `request.id` to `channel` and announce the new membership
    pub fn join(&mut self, channel: ChannelId, request: JoinRequest) {
        let JoinRequest { id, name } = request;
        let replaced = self.registry.upsert(Participant {
            id: id.clone(),
            name: name.clone(),
            channel,
        });

        if let Some(previous) = replaced.filter(|p| p.channel != channel) {
            debug!("{} rebound from {} to {}", id, previous.channel, channel);
        }
        info!("{} joined. Total users: {}", name, self.registry.len());

        self.broadcast_presence();
    }

    /// Stamp a chat message with a server id and timestamp and relay it to
    /// every channel, the sender included.
    ///
    /// Server fields overwrite caller fields of the same name.
    pub fn send_message(&mut self, payload: Value) -> Result<MessageAck, RelayError> {
        let mut message = match payload {
            Value::Object(map) => map,
            other => return Err(RelayError::InvalidPayload(json_kind(&other))),
        };

        let now = Utc::now();
        let id = self.message_ids.next(now);
        message.insert("id".to_string(), Value::String(id.clone()));
        message.insert(
            "timestamp".to_string(),
            Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        let missing = Value::Null;
        let sender = message.get("userId").unwrap_or(&missing);
        let content = message.get("content").unwrap_or(&missing);
        debug!("Message from {}: {}", sender, content);

        self.transport
            .broadcast(&OutboundEvent::MessageNew(Value::Object(message)));

        Ok(MessageAck { success: true, id })
    }

    /// Relay a typing indicator for a registered user; unknown users are dropped
    pub fn typing(&mut self, channel: ChannelId, signal: TypingSignal) {
        let Some(user) = self.registry.get(&signal.user_id) else {
            debug!("Ignoring typing from unregistered user {:?}", signal.user_id);
            return;
        };

        let indicator = TypingIndicator {
            user_id: signal.user_id,
            user_name: user.name.clone(),
            channel: signal.channel,
        };
        self.transport
            .broadcast_except(channel, &OutboundEvent::Typing(indicator));
    }

    pub fn typing_stop(&mut self, channel: ChannelId, signal: TypingStopSignal) {
        self.transport
            .broadcast_except(channel, &OutboundEvent::TypingStop(signal));
    }

    /// Remove the participant bound to `channel`, if any, and announce it
    pub fn disconnect(&mut self, channel: ChannelId) -> Option<Participant> {
        let removed = self.registry.remove_by_channel(channel)?;
        info!(
            "{} disconnected. Total users: {}",
            removed.name,
            self.registry.len()
        );
        self.broadcast_presence();
        Some(removed)
    }

    /// Decode and handle one client frame.
    ///
    /// Errors stay inside this call: undecodable frames are logged and
    /// dropped, relay failures only reach the client through its ack.
    pub fn dispatch(&mut self, channel: ChannelId, frame: ClientFrame) {
        if !self.transport.is_open(channel) {
            debug!("Dropping {} from closed {}", frame.event, channel);
            return;
        }

        let ClientFrame { event, data, ack } = frame;
        let event = match InboundEvent::parse(&event, data) {
            Ok(event) => event,
            Err(e) => {
                warn!("Dropping frame from {}: {}", channel, e);
                return;
            }
        };

        match event {
            InboundEvent::Join(request) => self.join(channel, request),
            InboundEvent::SendMessage(payload) => {
                let result = self.send_message(payload);
                if let Err(e) = &result {
                    warn!("Error sending message from {}: {}", channel, e);
                }
                if let Some(ack) = ack {
                    let reply = Acknowledgement {
                        ack,
                        result: AckResult::from(result),
                    };
                    self.transport.send_to(channel, &OutboundEvent::Ack(reply));
                }
            }
            InboundEvent::Typing(signal) => self.typing(channel, signal),
            InboundEvent::TypingStop(signal) => self.typing_stop(channel, signal),
        }
    }

    fn broadcast_presence(&self) {
        let update = PresenceUpdate {
            online_users: self.registry.snapshot(),
        };
        self.transport
            .broadcast(&OutboundEvent::PresenceUpdate(update));
    }
}

impl PresenceCoordinator<ChannelHub> {
    /// Register a freshly connected channel
    pub fn connect(&mut self, sender: ChannelSender) -> ChannelId {
        self.transport.open(sender)
    }

    /// Transport-level close: forget the channel, then run the disconnect path
    pub fn close(&mut self, channel: ChannelId) -> Option<Participant> {
        if !self.transport.close(channel) {
            return None;
        }
        self.disconnect(channel)
    }

    pub fn connected_channels(&self) -> usize {
        self.transport.len()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
