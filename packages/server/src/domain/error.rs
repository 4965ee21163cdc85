//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,

    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// DisplayName validation error
    #[error("DisplayName cannot be empty")]
    DisplayNameEmpty,

    /// MessageId validation error
    #[error("MessageId cannot be empty")]
    MessageIdEmpty,
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The connection is already a member of the room
    #[error("Connection '{0}' is already a member of the room")]
    DuplicateConnection(String),

    /// The connection is not a member of the room
    #[error("Connection '{0}' is not a member of the room")]
    MemberNotFound(String),
}

/// Errors returned by a [`RoomRepository`](super::RoomRepository)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No room is registered under the requested id
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    /// The room rejected the operation
    #[error(transparent)]
    Room(#[from] RoomError),
}
