//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// DisplayName validation error
    #[error("username cannot be empty")]
    DisplayNameEmpty,

    /// DisplayName too long error
    #[error("username cannot exceed {max} characters (got {actual})")]
    DisplayNameTooLong { max: usize, actual: usize },

    /// ConnectionId invalid format error (not a valid UUID format)
    #[error("ConnectionId must be a valid UUID format (got: {0})")]
    ConnectionIdInvalidFormat(String),

    /// MessageContent validation error
    #[error("message cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("message cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// Another session already uses the requested name
    #[error("username already exists")]
    NameTaken(String),

    /// The connection already owns a session
    #[error("already joined as {0}")]
    AlreadyJoined(String),
}

/// Errors returned by a SessionRepository
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The room rejected the session
    #[error(transparent)]
    Room(#[from] RoomError),

    /// No outbox is attached for the connection
    #[error("connection not attached: {0}")]
    ConnectionNotAttached(String),
}
