//! Socket event types exchanged with connected channels
//!
//! Every frame on the wire is a JSON object with an `event` name and a
//! `data` payload. Clients may add an `ack` id to `message:send` to
//! receive exactly one acknowledgement frame back; the id is echoed as sent.
//!
//! Payload fields are decoded leniently: a missing or `null` text field is
//! an empty string and any other non-string value is kept as its JSON text.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::RelayError;

/// Well-known event names
pub mod names {
    pub const JOIN: &str = "user:join";
    pub const JOIN_SHORT: &str = "join";
    pub const MESSAGE_SEND: &str = "message:send";
    pub const MESSAGE_NEW: &str = "message:new";
    pub const TYPING: &str = "user:typing";
    pub const TYPING_STOP: &str = "user:typing:stop";
    pub const PRESENCE_UPDATE: &str = "presence:update";
    pub const ACK: &str = "ack";
}

/// Raw frame received from a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
    /// Acknowledgement id requested by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ack: Option<Value>,
}

impl ClientFrame {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
            ack: None,
        }
    }

    pub fn with_ack(mut self, ack: impl Into<Value>) -> Self {
        self.ack = Some(ack.into());
        self
    }
}

/// Payload of `user:join`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
}

impl JoinRequest {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Payload of `user:typing`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingSignal {
    #[serde(default, deserialize_with = "lenient_text")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Value>,
}

/// Payload of `user:typing:stop`, relayed unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingStopSignal {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_id: Option<Value>,
}

impl TypingStopSignal {
    pub fn new(user_id: impl Into<Value>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }
}

/// Decoded inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    Join(JoinRequest),
    SendMessage(Value),
    Typing(TypingSignal),
    TypingStop(TypingStopSignal),
}

impl InboundEvent {
    /// Decode the payload of a named event
    pub fn parse(event: &str, data: Value) -> Result<Self, RelayError> {
        match event {
            names::JOIN | names::JOIN_SHORT => Ok(InboundEvent::Join(from_object(data)?)),
            names::MESSAGE_SEND => Ok(InboundEvent::SendMessage(data)),
            names::TYPING => Ok(InboundEvent::Typing(from_object(data)?)),
            names::TYPING_STOP => Ok(InboundEvent::TypingStop(from_object(data)?)),
            other => Err(RelayError::UnknownEvent(other.to_string())),
        }
    }
}

/// A payload that is not an object decodes like an empty one
fn from_object<T: serde::de::DeserializeOwned>(data: Value) -> Result<T, RelayError> {
    let data = match data {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };
    Ok(serde_json::from_value(data)?)
}

/// Text form of a registry key or display name
fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(&Value::deserialize(deserializer)?))
}

/// Keeps an explicit `null`, so only a missing field is `None`
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Entry of the presence list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresenceUpdate {
    #[serde(rename = "onlineUsers")]
    pub online_users: Vec<OnlineUser>,
}

/// Typing notification enriched with the display name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicator {
    pub user_id: String,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Value>,
}

/// Successful relay of a chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageAck {
    pub success: bool,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AckResult {
    Delivered(MessageAck),
    Failed { error: String },
}

impl From<Result<MessageAck, RelayError>> for AckResult {
    fn from(result: Result<MessageAck, RelayError>) -> Self {
        match result {
            Ok(ack) => AckResult::Delivered(ack),
            Err(e) => AckResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Acknowledgement frame payload, correlated by the client's ack id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acknowledgement {
    pub ack: Value,
    #[serde(flatten)]
    pub result: AckResult,
}

/// Event pushed to connected channels
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum OutboundEvent {
    #[serde(rename = "presence:update")]
    PresenceUpdate(PresenceUpdate),
    #[serde(rename = "message:new")]
    MessageNew(Value),
    #[serde(rename = "user:typing")]
    Typing(TypingIndicator),
    #[serde(rename = "user:typing:stop")]
    TypingStop(TypingStopSignal),
    #[serde(rename = "ack")]
    Ack(Acknowledgement),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::PresenceUpdate(_) => names::PRESENCE_UPDATE,
            OutboundEvent::MessageNew(_) => names::MESSAGE_NEW,
            OutboundEvent::Typing(_) => names::TYPING,
            OutboundEvent::TypingStop(_) => names::TYPING_STOP,
            OutboundEvent::Ack(_) => names::ACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_accepts_both_names() {
        let data = json!({"id": "u1", "name": "Alice"});
        let long = InboundEvent::parse("user:join", data.clone()).unwrap();
        let short = InboundEvent::parse("join", data).unwrap();
        assert_eq!(long, short);
        assert_eq!(long, InboundEvent::Join(JoinRequest::new("u1", "Alice")));
    }

    #[test]
    fn test_parse_join_missing_fields() {
        let event = InboundEvent::parse("user:join", Value::Null).unwrap();
        assert_eq!(event, InboundEvent::Join(JoinRequest::default()));
    }

    #[test]
    fn test_parse_join_coerces_field_types() {
        let event = InboundEvent::parse("user:join", json!({"id": "u1", "name": null})).unwrap();
        assert_eq!(event, InboundEvent::Join(JoinRequest::new("u1", "")));

        let event = InboundEvent::parse("user:join", json!({"id": 42, "name": "Bob"})).unwrap();
        assert_eq!(event, InboundEvent::Join(JoinRequest::new("42", "Bob")));

        let event = InboundEvent::parse("join", json!("not an object")).unwrap();
        assert_eq!(event, InboundEvent::Join(JoinRequest::default()));
    }

    #[test]
    fn test_parse_typing_stop_keeps_user_id_as_sent() {
        let event = InboundEvent::parse("user:typing:stop", json!({"userId": 7})).unwrap();
        assert_eq!(event, InboundEvent::TypingStop(TypingStopSignal::new(7)));

        let event = InboundEvent::parse("user:typing:stop", json!({"userId": null})).unwrap();
        assert_eq!(event, InboundEvent::TypingStop(TypingStopSignal::new(Value::Null)));

        let event = InboundEvent::parse("user:typing:stop", json!({})).unwrap();
        let InboundEvent::TypingStop(signal) = event else {
            panic!("expected typing stop");
        };
        assert_eq!(
            serde_json::to_value(OutboundEvent::TypingStop(signal)).unwrap(),
            json!({"event": "user:typing:stop", "data": {}})
        );
    }

    #[test]
    fn test_parse_unknown_event() {
        let result = InboundEvent::parse("user:wave", json!({}));
        assert!(matches!(result, Err(RelayError::UnknownEvent(name)) if name == "user:wave"));
    }

    #[test]
    fn test_parse_typing_camel_case() {
        let event =
            InboundEvent::parse("user:typing", json!({"userId": "u1", "channel": "general"}))
                .unwrap();
        assert_eq!(
            event,
            InboundEvent::Typing(TypingSignal {
                user_id: "u1".to_string(),
                channel: Some(json!("general")),
            })
        );
    }

    #[test]
    fn test_client_frame_parsing() {
        let frame: ClientFrame = serde_json::from_str(
            r#"{"event":"message:send","data":{"content":"hi"},"ack":7}"#,
        )
        .unwrap();
        assert_eq!(frame.event, "message:send");
        assert_eq!(frame.ack, Some(json!(7)));

        let frame: ClientFrame = serde_json::from_str(
            r#"{"event":"message:send","data":{"content":"hi"},"ack":"a1"}"#,
        )
        .unwrap();
        assert_eq!(frame.ack, Some(json!("a1")));

        let frame: ClientFrame = serde_json::from_str(r#"{"event":"user:typing:stop"}"#).unwrap();
        assert!(frame.data.is_null());
        assert_eq!(frame.ack, None);
    }

    #[test]
    fn test_presence_update_wire_shape() {
        let event = OutboundEvent::PresenceUpdate(PresenceUpdate {
            online_users: vec![OnlineUser {
                id: "u1".to_string(),
                name: "Alice".to_string(),
            }],
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({
                "event": "presence:update",
                "data": {"onlineUsers": [{"id": "u1", "name": "Alice"}]}
            })
        );
    }

    #[test]
    fn test_typing_indicator_omits_missing_channel() {
        let event = OutboundEvent::Typing(TypingIndicator {
            user_id: "u1".to_string(),
            user_name: "Alice".to_string(),
            channel: None,
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(
            value,
            json!({"event": "user:typing", "data": {"userId": "u1", "userName": "Alice"}})
        );
    }

    #[test]
    fn test_ack_wire_shapes() {
        let ok = OutboundEvent::Ack(Acknowledgement {
            ack: json!(3),
            result: AckResult::from(Ok(MessageAck {
                success: true,
                id: "msg-1-1".to_string(),
            })),
        });
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"event": "ack", "data": {"ack": 3, "success": true, "id": "msg-1-1"}})
        );

        let failed = OutboundEvent::Ack(Acknowledgement {
            ack: json!("a4"),
            result: AckResult::from(Err(RelayError::InvalidPayload("string"))),
        });
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({
                "event": "ack",
                "data": {"ack": "a4", "error": "message payload must be a JSON object, got string"}
            })
        );
    }
}
