//! UseCase: room deletion.
//!
//! Deletion cascades: the room leaves the directory and its message log is
//! bulk-deleted. Presence and connection bindings are not forcibly cleared;
//! clients react to the `roomDeleted` notification by leaving.

use std::sync::Arc;

use crate::domain::{MessageStore, RESERVED_ROOMS, RoomDirectory, RoomName, Username};

use super::error::DeleteRoomError;

/// Delete a room and its messages, administrator only.
pub struct DeleteRoomUseCase {
    directory: Arc<dyn RoomDirectory>,
    messages: Arc<dyn MessageStore>,
    admin: Username,
}

impl DeleteRoomUseCase {
    pub fn new(
        directory: Arc<dyn RoomDirectory>,
        messages: Arc<dyn MessageStore>,
        admin: Username,
    ) -> Self {
        Self {
            directory,
            messages,
            admin,
        }
    }

    /// Execute room deletion.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - the updated room list, for broadcast to all
    ///   connections
    /// * `Err(DeleteRoomError)` - deletion refused or a store call failed
    pub async fn execute(
        &self,
        room: RoomName,
        requester: &Username,
    ) -> Result<Vec<String>, DeleteRoomError> {
        if requester != &self.admin {
            return Err(DeleteRoomError::Unauthorized(requester.as_str().to_string()));
        }
        if RESERVED_ROOMS.contains(&room.as_str()) {
            return Err(DeleteRoomError::Reserved(room.into_string()));
        }

        self.directory.remove(&room).await?;
        self.messages.remove_room(&room).await?;

        let rooms = self.directory.list().await?;
        Ok(rooms.into_iter().map(RoomName::into_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageText, StoredMessage};
    use crate::infrastructure::repository::{InMemoryMessageStore, InMemoryRoomDirectory};

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    fn user(name: &str) -> Username {
        Username::new(name.to_string()).unwrap()
    }

    async fn populated_stores() -> (Arc<InMemoryRoomDirectory>, Arc<InMemoryMessageStore>) {
        let directory = Arc::new(InMemoryRoomDirectory::new());
        directory.insert(room("General")).await.unwrap();
        directory.insert(room("Ops")).await.unwrap();

        let messages = Arc::new(InMemoryMessageStore::new());
        messages
            .append(StoredMessage::new(
                room("Ops"),
                user("alice"),
                MessageText::new("hi".to_string()).unwrap(),
                "10:00:00".to_string(),
            ))
            .await
            .unwrap();
        (directory, messages)
    }

    #[tokio::test]
    async fn test_delete_room_cascades() {
        // given:
        let (directory, messages) = populated_stores().await;
        let usecase = DeleteRoomUseCase::new(directory.clone(), messages.clone(), user("admin"));

        // when:
        let result = usecase.execute(room("Ops"), &user("admin")).await;

        // then: the room is gone from the directory and its log is empty
        assert_eq!(result.unwrap(), vec!["General".to_string()]);
        assert!(!directory.contains(&room("Ops")).await.unwrap());
        assert!(messages.recent(&room("Ops"), 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_room_unauthorized_changes_nothing() {
        // given:
        let (directory, messages) = populated_stores().await;
        let usecase = DeleteRoomUseCase::new(directory.clone(), messages.clone(), user("admin"));

        // when: a non-administrator asks for deletion
        let result = usecase.execute(room("Ops"), &user("bob")).await;

        // then: refused, directory and message store untouched
        assert_eq!(
            result,
            Err(DeleteRoomError::Unauthorized("bob".to_string()))
        );
        assert!(directory.contains(&room("Ops")).await.unwrap());
        assert_eq!(messages.recent(&room("Ops"), 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reserved_room_refused() {
        // given:
        let (directory, messages) = populated_stores().await;
        let usecase = DeleteRoomUseCase::new(directory.clone(), messages, user("admin"));

        // when:
        let result = usecase.execute(room("General"), &user("admin")).await;

        // then:
        assert_eq!(
            result,
            Err(DeleteRoomError::Reserved("General".to_string()))
        );
        assert!(directory.contains(&room("General")).await.unwrap());
    }
}
