//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod value_object;

pub use entity::{RESERVED_ROOMS, StoredMessage};
pub use error::{StoreError, ValueObjectError};
pub use repository::{MessageStore, RoomDirectory};
pub use value_object::{MessageText, RoomName, Username};
