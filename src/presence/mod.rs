//! Real-time presence and chat relay
//!
//! Tracks which participants are connected, broadcasts membership changes,
//! relays chat messages with a server-assigned id and timestamp, and relays
//! typing indicators. The network transport lives elsewhere; this module
//! only talks to channels through the [`Transport`] trait.

pub mod channel;
pub mod coordinator;
pub mod events;
pub mod registry;

pub use channel::{ChannelHub, ChannelId, ChannelSender, Transport};
pub use coordinator::{shared_coordinator, PresenceCoordinator, SharedCoordinator};
pub use events::{ClientFrame, InboundEvent, JoinRequest, MessageAck, OnlineUser, OutboundEvent};
pub use registry::{Participant, Registry};
