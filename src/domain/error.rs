//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("room name cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("room name cannot exceed {max} bytes (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Username validation error
    #[error("username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("username cannot exceed {max} bytes (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("message text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("message text cannot exceed {max} bytes (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors raised by the durable stores (room directory and message store).
///
/// A store failure degrades the single request that hit it; it is never
/// fatal to the process and the core performs no retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The durable read or write could not be completed
    #[error("durable store unavailable: {0}")]
    Unavailable(String),
}
