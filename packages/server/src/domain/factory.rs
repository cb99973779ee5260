//! Domain factories for generating identifiers.

use super::value_object::{MessageId, RoomId};

/// Factory for generating RoomId instances.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new RoomId with a random UUID v4.
    pub fn generate() -> RoomId {
        RoomId::from_uuid(uuid::Uuid::new_v4())
    }
}

/// Factory for generating MessageId instances.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}
