//! WebSocket event DTOs for the chat relay.
//!
//! Events are JSON text frames, internally tagged by `type` with camelCase
//! tags and fields, e.g. `{"type":"joinRoom","room":"General","username":"A"}`.

use serde::{Deserialize, Serialize};

use crate::domain::StoredMessage;

/// Events a client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientEvent {
    /// Request the current room directory
    GetRooms,
    /// Create a room
    CreateRoom { room: String },
    /// Delete a room (administrator only)
    DeleteRoom { room: String, username: String },
    /// Bind this connection to a room
    JoinRoom { room: String, username: String },
    /// Unbind this connection from a room
    LeaveRoom { room: String, username: String },
    /// Send a chat message to a room
    ChatMessage {
        room: String,
        username: String,
        text: String,
        display_time: String,
    },
    /// Transient typing signal
    Typing { room: String, username: String },
    /// End of a transient typing signal
    StopTyping { room: String, username: String },
}

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    /// Directory snapshot, broadcast to every connection on change
    RoomList { rooms: Vec<String> },
    /// Full presence snapshot for a room
    UserList { users: Vec<String> },
    /// Recent history, sent once to a connection right after it joins
    MessageHistory { messages: Vec<HistoryEntry> },
    /// A chat message fanned out to a room (room omitted on the wire)
    ChatMessage {
        username: String,
        text: String,
        display_time: String,
    },
    /// Another member started typing
    Typing { username: String },
    /// Another member stopped typing
    StopTyping { username: String },
    /// Presence churn text, e.g. "alice left the room."
    Notification { text: String },
    /// Non-fatal protocol error, sent to the offending connection only
    ErrorMessage { text: String },
    /// The room a connection is in was deleted
    RoomDeleted { room: String },
}

/// One replayed message in a `messageHistory` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub username: String,
    pub text: String,
    pub display_time: String,
}

impl From<StoredMessage> for HistoryEntry {
    fn from(message: StoredMessage) -> Self {
        Self {
            username: message.username.into_string(),
            text: message.text.into_string(),
            display_time: message.display_time,
        }
    }
}
