//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageText, RoomName, Username};

/// Rooms guaranteed to exist at process start. Exempt from deletion.
pub const RESERVED_ROOMS: [&str; 2] = ["General", "Random"];

/// A persisted chat message. Immutable once stored; the store assigns
/// the retrieval order (insertion order within a room).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    /// Room the message was sent to
    pub room: RoomName,
    /// Sender's username
    pub username: Username,
    /// Message body
    pub text: MessageText,
    /// Client-supplied display time, passed through untouched
    pub display_time: String,
}

impl StoredMessage {
    /// Create a new stored message
    pub fn new(room: RoomName, username: Username, text: MessageText, display_time: String) -> Self {
        Self {
            room,
            username,
            text,
            display_time,
        }
    }
}
