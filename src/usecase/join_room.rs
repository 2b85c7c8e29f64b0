//! UseCase: history replay on join.
//!
//! A freshly joined connection is replayed the most recent messages of its
//! room. A history read failure degrades only the replay; the join (bind +
//! presence update) has already happened by the time this runs.

use std::sync::Arc;

use crate::domain::{MessageStore, RoomName, StoredMessage};

use super::error::JoinRoomError;

/// Fetch the recent history a joining connection should be replayed.
pub struct JoinRoomUseCase {
    messages: Arc<dyn MessageStore>,
}

impl JoinRoomUseCase {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }

    /// Execute the bounded history read.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<StoredMessage>)` - up to `limit` messages, oldest first
    /// * `Err(JoinRoomError)` - the store read failed
    pub async fn execute(
        &self,
        room: &RoomName,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, JoinRoomError> {
        let messages = self.messages.recent(room, limit).await?;
        Ok(messages)
    }
}
