//! Best-effort event fanout.
//!
//! Delivery pushes a serialized event into each target connection's
//! outbound channel. A connection that is mid-disconnect may have a closed
//! channel; the failed send is logged and skipped. No acknowledgment, no
//! retry.

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::RoomName,
    infrastructure::dto::websocket::ServerEvent,
    registry::{ConnectionId, ConnectionRegistry},
};

/// Deliver an event to every connection bound to `room`.
pub fn to_room(registry: &ConnectionRegistry, room: &RoomName, event: &ServerEvent) {
    deliver(registry.room_senders(room), event);
}

/// Deliver an event to every connection bound to `room` except one
/// (used by the typing relay so the sender never echoes to itself).
pub fn to_room_except(
    registry: &ConnectionRegistry,
    room: &RoomName,
    excluded: ConnectionId,
    event: &ServerEvent,
) {
    deliver(registry.room_senders_except(room, excluded), event);
}

/// Deliver an event to every live connection, bound to a room or not
/// (used for directory-wide room list updates).
pub fn to_all(registry: &ConnectionRegistry, event: &ServerEvent) {
    deliver(registry.all_senders(), event);
}

/// Deliver an event to a single connection's outbound channel.
pub fn to_sender(sender: &UnboundedSender<String>, event: &ServerEvent) {
    if sender.send(encode(event)).is_err() {
        tracing::warn!("dropping event for a disconnecting client");
    }
}

fn deliver(senders: Vec<UnboundedSender<String>>, event: &ServerEvent) {
    let payload = encode(event);
    for sender in senders {
        if sender.send(payload.clone()).is_err() {
            tracing::warn!("dropping event for a disconnecting client");
        }
    }
}

// ServerEvent is a struct-variant-only enum; serializing it cannot fail.
fn encode(event: &ServerEvent) -> String {
    serde_json::to_string(event).unwrap()
}
