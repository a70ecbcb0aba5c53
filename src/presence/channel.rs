//! Channel handles and the in-process transport hub

use std::collections::HashMap;
use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

use super::events::OutboundEvent;

/// Opaque handle identifying one connected duplex channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// Sender half of a channel. Whoever holds the receiver writes to the socket.
pub type ChannelSender = mpsc::UnboundedSender<OutboundEvent>;

/// Outbound side of the transport the coordinator talks through.
///
/// Sends are fire-and-forget: a channel whose receiver is gone is skipped.
pub trait Transport {
    /// Send to a single channel
    fn send_to(&self, channel: ChannelId, event: &OutboundEvent);

    /// Send to every open channel
    fn broadcast(&self, event: &OutboundEvent);

    /// Send to every open channel except `except`
    fn broadcast_except(&self, except: ChannelId, event: &OutboundEvent);

    /// Whether the channel is still connected
    fn is_open(&self, channel: ChannelId) -> bool;
}

/// Maps channel ids to their mpsc senders
#[derive(Debug, Default)]
pub struct ChannelHub {
    next_id: u64,
    channels: HashMap<ChannelId, ChannelSender>,
}

impl ChannelHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new channel and return its handle
    pub fn open(&mut self, sender: ChannelSender) -> ChannelId {
        self.next_id += 1;
        let id = ChannelId(self.next_id);
        self.channels.insert(id, sender);
        debug!("Opened {} ({} open)", id, self.channels.len());
        id
    }

    /// Forget a channel. Returns false if it was not open.
    pub fn close(&mut self, channel: ChannelId) -> bool {
        let closed = self.channels.remove(&channel).is_some();
        if closed {
            debug!("Closed {} ({} open)", channel, self.channels.len());
        }
        closed
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Transport for ChannelHub {
    fn send_to(&self, channel: ChannelId, event: &OutboundEvent) {
        if let Some(sender) = self.channels.get(&channel) {
            let _ = sender.send(event.clone());
        }
    }

    fn broadcast(&self, event: &OutboundEvent) {
        for sender in self.channels.values() {
            let _ = sender.send(event.clone());
        }
    }

    fn broadcast_except(&self, except: ChannelId, event: &OutboundEvent) {
        for (id, sender) in &self.channels {
            if *id != except {
                let _ = sender.send(event.clone());
            }
        }
    }

    fn is_open(&self, channel: ChannelId) -> bool {
        self.channels.contains_key(&channel)
    }
}
