//! UseCase layer.
//!
//! Business operations invoked by the UI layer. Each usecase depends on
//! the domain store traits only, never on a concrete implementation.

pub mod create_room;
pub mod delete_room;
pub mod error;
pub mod join_room;
pub mod send_message;

pub use create_room::CreateRoomUseCase;
pub use delete_room::DeleteRoomUseCase;
pub use error::{CreateRoomError, DeleteRoomError, JoinRoomError, SendMessageError};
pub use join_room::JoinRoomUseCase;
pub use send_message::SendMessageUseCase;
