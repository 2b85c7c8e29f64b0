//! Connection registry and presence tracking.
//!
//! One entry per live transport connection, with at most one
//! (room, username) binding at a time. Presence per room is derived
//! incrementally from bind/unbind so that snapshot order is first-join
//! order and removals do not reorder survivors.
//!
//! The registry itself is not thread-safe; the server holds it behind a
//! single `tokio::sync::Mutex` in `AppState`, so all mutations are atomic
//! with respect to each other.

use std::collections::HashMap;
use std::fmt;

use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::domain::{RoomName, Username};

/// Opaque per-transport-session handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connection's current room binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub room: RoomName,
    pub username: Username,
}

/// Per-connection state: the outbound event channel and the binding, if any.
pub struct ClientConn {
    /// Serialized server events are pushed here and forwarded to the socket
    pub sender: UnboundedSender<String>,
    /// Current (room, username) binding; `None` until the first join
    pub binding: Option<Binding>,
}

/// In-memory registry of live connections and per-room presence.
#[derive(Default)]
pub struct ConnectionRegistry {
    conns: HashMap<ConnectionId, ClientConn>,
    /// room -> usernames in first-join order, each at most once
    presence: HashMap<RoomName, Vec<Username>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly connected, unbound client.
    pub fn register(&mut self, id: ConnectionId, sender: UnboundedSender<String>) {
        self.conns.insert(
            id,
            ClientConn {
                sender,
                binding: None,
            },
        );
    }

    /// Remove a connection entirely, returning the binding it held.
    ///
    /// Unbinds first so presence for the connection's room is updated.
    pub fn deregister(&mut self, id: ConnectionId) -> Option<Binding> {
        let binding = self.unbind(id);
        self.conns.remove(&id);
        binding
    }

    /// Bind a connection to (room, username), replacing any prior binding.
    ///
    /// Presence is updated for the old room (if any) and the new room.
    /// Returns the previous room when the connection was bound to a
    /// different room, so the caller can refresh that room's user list.
    pub fn bind(&mut self, id: ConnectionId, room: RoomName, username: Username) -> Option<RoomName> {
        let previous = match self.conns.get_mut(&id) {
            Some(conn) => conn.binding.replace(Binding {
                room: room.clone(),
                username: username.clone(),
            }),
            None => return None,
        };
        if let Some(prev) = &previous {
            self.drop_presence(prev);
        }
        self.add_presence(&room, &username);
        previous.map(|b| b.room).filter(|prev| prev != &room)
    }

    /// Clear a connection's binding, returning what was cleared.
    ///
    /// Idempotent: a second call on the same connection is a no-op and
    /// returns `None`.
    pub fn unbind(&mut self, id: ConnectionId) -> Option<Binding> {
        let binding = self.conns.get_mut(&id)?.binding.take();
        if let Some(cleared) = &binding {
            self.drop_presence(cleared);
        }
        binding
    }

    /// The binding a connection currently holds.
    pub fn binding_of(&self, id: ConnectionId) -> Option<&Binding> {
        self.conns.get(&id)?.binding.as_ref()
    }

    /// Presence snapshot for a room: distinct usernames in first-join order.
    pub fn snapshot(&self, room: &RoomName) -> Vec<Username> {
        self.presence.get(room).cloned().unwrap_or_default()
    }

    /// Outbound channels of every connection bound to `room`.
    pub fn room_senders(&self, room: &RoomName) -> Vec<UnboundedSender<String>> {
        self.conns
            .values()
            .filter(|conn| conn.binding.as_ref().is_some_and(|b| &b.room == room))
            .map(|conn| conn.sender.clone())
            .collect()
    }

    /// Same as [`room_senders`](Self::room_senders), minus one connection.
    pub fn room_senders_except(
        &self,
        room: &RoomName,
        excluded: ConnectionId,
    ) -> Vec<UnboundedSender<String>> {
        self.conns
            .iter()
            .filter(|(id, conn)| {
                **id != excluded && conn.binding.as_ref().is_some_and(|b| &b.room == room)
            })
            .map(|(_, conn)| conn.sender.clone())
            .collect()
    }

    /// Outbound channels of every live connection, bound or not.
    pub fn all_senders(&self) -> Vec<UnboundedSender<String>> {
        self.conns.values().map(|conn| conn.sender.clone()).collect()
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.conns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conns.is_empty()
    }

    fn add_presence(&mut self, room: &RoomName, username: &Username) {
        let users = self.presence.entry(room.clone()).or_default();
        if !users.contains(username) {
            users.push(username.clone());
        }
    }

    /// Remove a cleared binding's username from its room's presence, unless
    /// another live connection still holds the same (room, username).
    fn drop_presence(&mut self, cleared: &Binding) {
        let still_bound = self
            .conns
            .values()
            .any(|conn| conn.binding.as_ref() == Some(cleared));
        if still_bound {
            return;
        }
        if let Some(users) = self.presence.get_mut(&cleared.room) {
            users.retain(|u| u != &cleared.username);
            if users.is_empty() {
                self.presence.remove(&cleared.room);
            }
        }
    }
}
