//! UseCase: room creation.

use std::sync::Arc;

use crate::domain::{RoomDirectory, RoomName};

use super::error::CreateRoomError;

/// Create a room in the directory and report the updated room list.
pub struct CreateRoomUseCase {
    directory: Arc<dyn RoomDirectory>,
}

impl CreateRoomUseCase {
    pub fn new(directory: Arc<dyn RoomDirectory>) -> Self {
        Self { directory }
    }

    /// Execute room creation.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - the updated room list, for broadcast to all
    ///   connections
    /// * `Err(CreateRoomError)` - creation failed
    ///
    /// The existence check and the insert are separate store calls; two
    /// racing creates for the same name can both pass the check. The
    /// directory's set-semantic insert is the only backstop.
    pub async fn execute(&self, name: RoomName) -> Result<Vec<String>, CreateRoomError> {
        if self.directory.contains(&name).await? {
            return Err(CreateRoomError::AlreadyExists(name.into_string()));
        }
        self.directory.insert(name).await?;

        let rooms = self.directory.list().await?;
        Ok(rooms.into_iter().map(RoomName::into_string).collect())
    }
}
