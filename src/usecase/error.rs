//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::StoreError;

/// Room creation failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CreateRoomError {
    /// A room of this name already exists in the directory
    #[error("room '{0}' already exists")]
    AlreadyExists(String),

    /// The directory could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Room deletion failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeleteRoomError {
    /// The requester is not the administrator
    #[error("'{0}' is not authorized to delete rooms")]
    Unauthorized(String),

    /// Reserved rooms exist for the lifetime of the process
    #[error("room '{0}' is reserved and cannot be deleted")]
    Reserved(String),

    /// A store could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Message send failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    /// The durable append failed; the message must not be fanned out
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// History replay failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    /// The history read failed; the join itself still succeeds
    #[error(transparent)]
    Store(#[from] StoreError),
}
