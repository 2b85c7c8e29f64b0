//! UseCase: message send path.
//!
//! The durable append happens before any fanout. If the append fails the
//! message is not broadcast, so visible chat never diverges from persisted
//! history; the error is surfaced to the sending connection only.

use std::sync::Arc;

use crate::domain::{MessageStore, StoredMessage};

use super::error::SendMessageError;

/// Persist a message so the caller may fan it out.
pub struct SendMessageUseCase {
    messages: Arc<dyn MessageStore>,
}

impl SendMessageUseCase {
    pub fn new(messages: Arc<dyn MessageStore>) -> Self {
        Self { messages }
    }

    /// Execute the durable append.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - persisted; the caller may broadcast
    /// * `Err(SendMessageError)` - not persisted; the caller must not
    ///   broadcast
    pub async fn execute(&self, message: StoredMessage) -> Result<(), SendMessageError> {
        self.messages.append(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, RoomName, StoreError, Username, repository::MockMessageStore};
    use crate::infrastructure::repository::InMemoryMessageStore;

    fn message(text: &str) -> StoredMessage {
        StoredMessage::new(
            RoomName::new("General".to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            "10:00:00".to_string(),
        )
    }

    #[tokio::test]
    async fn test_send_message_persists() {
        // given:
        let store = Arc::new(InMemoryMessageStore::new());
        let usecase = SendMessageUseCase::new(store.clone());

        // when:
        let result = usecase.execute(message("hi")).await;

        // then:
        assert!(result.is_ok());
        let room = RoomName::new("General".to_string()).unwrap();
        let recent = store.recent(&room, 50).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].text.as_str(), "hi");
    }

    #[tokio::test]
    async fn test_send_message_store_failure() {
        // given: a message store whose append fails
        let mut store = MockMessageStore::new();
        store
            .expect_append()
            .returning(|_| Err(StoreError::Unavailable("log down".to_string())));
        let usecase = SendMessageUseCase::new(Arc::new(store));

        // when:
        let result = usecase.execute(message("hi")).await;

        // then:
        assert_eq!(
            result,
            Err(SendMessageError::Store(StoreError::Unavailable(
                "log down".to_string()
            )))
        );
    }
}
