//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomId invalid format error (not a valid UUID format)
    #[error("RoomId must be a valid UUID format (got: {0})")]
    RoomIdInvalidFormat(String),

    /// MessageId invalid format error (not a valid UUID format)
    #[error("MessageId must be a valid UUID format (got: {0})")]
    MessageIdInvalidFormat(String),

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// UserId too long error
    #[error("UserId cannot exceed {max} characters (got {actual})")]
    UserIdTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors related to Room domain logic
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// The user is already a member of the room
    #[error("user '{0}' is already a member of the room")]
    AlreadyMember(String),
}

/// Errors returned by `ChatRepository` implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Room lookup failed
    #[error("room '{0}' not found")]
    RoomNotFound(String),

    /// Domain-level rejection while mutating a room
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Underlying store failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors returned by `IdentityResolver` implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential was rejected by the auth service
    #[error("credential rejected")]
    Unauthenticated,

    /// The auth service could not be reached
    #[error("auth service unreachable: {0}")]
    Transport(String),

    /// The auth service answered with an unusable payload
    #[error("malformed auth response: {0}")]
    MalformedResponse(String),
}

/// Errors returned by `MessageBroker` implementations
///
/// Transport details are carried as strings so the domain stays free of
/// broker-client types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// Dialing the broker failed after exhausting all retry attempts
    #[error("broker unreachable after {attempts} attempts: {reason}")]
    DialExhausted { attempts: u32, reason: String },

    /// Channel or queue setup failed
    #[error("broker setup failed: {0}")]
    Setup(String),

    /// Message could not be serialized for the wire
    #[error("message serialization failed: {0}")]
    Serialization(String),

    /// Publish failed at the transport level
    #[error("publish failed: {0}")]
    Publish(String),
}

/// Errors returned by `ClientConnection` implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The peer is gone or the transport failed mid-write
    #[error("connection write failed: {0}")]
    WriteFailed(String),

    /// The connection was already closed
    #[error("connection closed")]
    Closed,
}
