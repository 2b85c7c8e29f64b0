//! Durable store traits.
//!
//! The room directory and message store are external collaborators; the
//! core only talks to them through these traits (dependency inversion).
//! Store calls are asynchronous suspension points: other connections'
//! events may interleave while a call is in flight.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::{entity::StoredMessage, error::StoreError, value_object::RoomName};

/// Durable set of room names. Source of truth for which rooms exist.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// Insert a room name. Inserting a name that is already present is a
    /// no-op (set semantics).
    async fn insert(&self, name: RoomName) -> Result<(), StoreError>;

    /// Remove a room name. Removing an absent name is a no-op.
    async fn remove(&self, name: &RoomName) -> Result<(), StoreError>;

    /// Whether a room of this name currently exists.
    async fn contains(&self, name: &RoomName) -> Result<bool, StoreError>;

    /// All room names. Order unspecified but stable within a single read.
    async fn list(&self) -> Result<Vec<RoomName>, StoreError>;
}

/// Durable, append-only per-room message log.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a message to its room's log.
    async fn append(&self, message: StoredMessage) -> Result<(), StoreError>;

    /// The most recent `limit` messages for `room`, in chronological order.
    async fn recent(&self, room: &RoomName, limit: usize)
    -> Result<Vec<StoredMessage>, StoreError>;

    /// Delete every message for `room` (room deletion cascade).
    async fn remove_room(&self, room: &RoomName) -> Result<(), StoreError>;
}
