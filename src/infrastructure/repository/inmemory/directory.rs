//! In-memory room directory.
//!
//! Stand-in for an external durable store, usable as-is for a single
//! process. Insertion order is kept so `list` is stable across reads.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RoomDirectory, RoomName, StoreError};

/// In-memory `RoomDirectory` implementation backed by a `Vec` with set
/// semantics (duplicate inserts are no-ops).
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    rooms: Mutex<Vec<RoomName>>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn insert(&self, name: RoomName) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        if !rooms.contains(&name) {
            rooms.push(name);
        }
        Ok(())
    }

    async fn remove(&self, name: &RoomName) -> Result<(), StoreError> {
        let mut rooms = self.rooms.lock().await;
        rooms.retain(|room| room != name);
        Ok(())
    }

    async fn contains(&self, name: &RoomName) -> Result<bool, StoreError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.contains(name))
    }

    async fn list(&self) -> Result<Vec<RoomName>, StoreError> {
        let rooms = self.rooms.lock().await;
        Ok(rooms.clone())
    }
}
