//! Registry of joined participants

use indexmap::IndexMap;

use super::channel::ChannelId;
use super::events::OnlineUser;

/// A joined participant bound to one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub channel: ChannelId,
}

impl Participant {
    pub fn to_online_user(&self) -> OnlineUser {
        OnlineUser {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Participants keyed by id, iterated in order of first insertion.
///
/// Overwriting an id keeps its position; an id that was removed and joins
/// again goes to the end.
#[derive(Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, Participant>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for `participant.id`.
    /// Returns the replaced entry, if any.
    pub fn upsert(&mut self, participant: Participant) -> Option<Participant> {
        self.entries.insert(participant.id.clone(), participant)
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.entries.get(id)
    }

    /// Remove the first entry bound to `channel`, shifting later entries up
    pub fn remove_by_channel(&mut self, channel: ChannelId) -> Option<Participant> {
        let index = self.entries.values().position(|p| p.channel == channel)?;
        self.entries
            .shift_remove_index(index)
            .map(|(_, participant)| participant)
    }

    /// `{id, name}` for every entry, in iteration order
    pub fn snapshot(&self) -> Vec<OnlineUser> {
        self.entries.values().map(Participant::to_online_user).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
