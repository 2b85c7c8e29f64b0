//! Server state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::{
    domain::{MessageStore, RoomDirectory, RoomName, Username},
    registry::ConnectionRegistry,
};

/// Shared application state.
pub struct AppState {
    /// Connection registry + presence, behind a single mutex so all
    /// bind/unbind mutations are atomic with respect to each other
    pub registry: Mutex<ConnectionRegistry>,
    /// Durable room directory
    pub directory: Arc<dyn RoomDirectory>,
    /// Durable message store
    pub messages: Arc<dyn MessageStore>,
    /// Per-room locks serializing append + fanout on the send path
    pub send_locks: RoomLocks,
    /// The one username authorized to delete rooms
    pub admin: Username,
    /// Messages replayed to a freshly joined connection
    pub history_limit: usize,
}

impl AppState {
    pub fn new(
        directory: Arc<dyn RoomDirectory>,
        messages: Arc<dyn MessageStore>,
        admin: Username,
        history_limit: usize,
    ) -> Self {
        Self {
            registry: Mutex::new(ConnectionRegistry::new()),
            directory,
            messages,
            send_locks: RoomLocks::default(),
            admin,
            history_limit,
        }
    }
}

/// One async lock per room name.
///
/// Holding a room's lock across the durable append and the fanout keeps
/// fanout order equal to store order within that room, while senders to
/// other rooms proceed unblocked.
#[derive(Default)]
pub struct RoomLocks {
    locks: Mutex<HashMap<RoomName, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    /// Acquire the lock for `room`, creating it on first use.
    pub async fn acquire(&self, room: &RoomName) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(room.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop the lock entry for `room`. Called when a room is deleted so the
    /// map does not accumulate an entry per room name ever messaged. A
    /// sender still holding the guard keeps its mutex alive through the Arc.
    pub async fn remove(&self, room: &RoomName) {
        self.locks.lock().await.remove(room);
    }
}
