//! In-memory message store.
//!
//! Append-only per-room logs; retrieval order is insertion order, which is
//! the only ordering the relay guarantees within a room.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessageStore, RoomName, StoreError, StoredMessage};

/// In-memory `MessageStore` implementation backed by a per-room `Vec`.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: Mutex<HashMap<RoomName, Vec<StoredMessage>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: StoredMessage) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.entry(message.room.clone()).or_default().push(message);
        Ok(())
    }

    async fn recent(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, StoreError> {
        let messages = self.messages.lock().await;
        let log = match messages.get(room) {
            Some(log) => log,
            None => return Ok(Vec::new()),
        };
        let start = log.len().saturating_sub(limit);
        Ok(log[start..].to_vec())
    }

    async fn remove_room(&self, room: &RoomName) -> Result<(), StoreError> {
        let mut messages = self.messages.lock().await;
        messages.remove(room);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, Username};

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn message(room_name: &str, username: &str, text: &str) -> StoredMessage {
        StoredMessage::new(
            room(room_name),
            Username::new(username.to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            "10:00:00".to_string(),
        )
    }

    #[tokio::test]
    async fn test_recent_returns_chronological_order() {
        // given:
        let store = InMemoryMessageStore::new();
        store.append(message("General", "alice", "m1")).await.unwrap();
        store.append(message("General", "bob", "m2")).await.unwrap();
        store.append(message("General", "alice", "m3")).await.unwrap();

        // when:
        let recent = store.recent(&room("General"), 50).await.unwrap();

        // then:
        let texts: Vec<&str> = recent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_recent_bounds_to_limit_keeping_newest() {
        // given:
        let store = InMemoryMessageStore::new();
        for i in 1..=5 {
            store
                .append(message("General", "alice", &format!("m{i}")))
                .await
                .unwrap();
        }

        // when:
        let recent = store.recent(&room("General"), 3).await.unwrap();

        // then: the newest 3, still oldest-first
        let texts: Vec<&str> = recent.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["m3", "m4", "m5"]);
    }

    #[tokio::test]
    async fn test_recent_for_unknown_room_is_empty() {
        // given:
        let store = InMemoryMessageStore::new();

        // then:
        assert!(store.recent(&room("General"), 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        // given:
        let store = InMemoryMessageStore::new();
        store.append(message("General", "alice", "hi")).await.unwrap();
        store.append(message("Random", "bob", "yo")).await.unwrap();

        // then:
        assert_eq!(store.recent(&room("General"), 50).await.unwrap().len(), 1);
        assert_eq!(store.recent(&room("Random"), 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_room_deletes_all_messages() {
        // given:
        let store = InMemoryMessageStore::new();
        store.append(message("General", "alice", "m1")).await.unwrap();
        store.append(message("General", "bob", "m2")).await.unwrap();

        // when:
        store.remove_room(&room("General")).await.unwrap();

        // then:
        assert!(store.recent(&room("General"), 50).await.unwrap().is_empty());
    }
}
