//! Core domain models for the chat backend.

use serde::{Deserialize, Serialize};

use super::{
    error::RoomError,
    value_object::{MessageContent, MessageId, RoomId, RoomName, Timestamp, UserId},
};

/// A persisted chat room with a membership list.
///
/// Rooms are created by an explicit create-room operation and are never
/// hard-deleted; the in-memory runtime for an *active* room lives in the
/// engine layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Display name
    pub name: RoomName,
    /// Administrator (the creating user)
    pub admin_id: UserId,
    /// Users with access to the room
    pub members: Vec<UserId>,
    /// Timestamp when the room was created
    pub created_at: Timestamp,
}

impl Room {
    /// Create a new room. The administrator becomes the first member.
    pub fn new(id: RoomId, name: RoomName, admin_id: UserId, created_at: Timestamp) -> Self {
        Self {
            id,
            name,
            admin_id: admin_id.clone(),
            members: vec![admin_id],
            created_at,
        }
    }

    /// Add a user to the membership list.
    ///
    /// # Errors
    ///
    /// Returns `RoomError::AlreadyMember` if the user already has access.
    pub fn add_member(&mut self, user_id: UserId) -> Result<(), RoomError> {
        if self.is_member(&user_id) {
            return Err(RoomError::AlreadyMember(user_id.as_str().to_string()));
        }
        self.members.push(user_id);
        Ok(())
    }

    /// Check whether a user has access to the room.
    pub fn is_member(&self, user_id: &UserId) -> bool {
        self.members.iter().any(|m| m == user_id)
    }
}

/// A chat message.
///
/// Built server-side from client input: room and sender are stamped by the
/// gateway and never trusted from the client. Immutable once constructed;
/// persisted exactly once before any fan-out is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message identifier
    pub id: MessageId,
    /// Sending user
    pub sender_id: UserId,
    /// Target room
    pub room_id: RoomId,
    /// Message body
    pub content: MessageContent,
    /// Timestamp when the message was accepted by the server
    pub created_at: Timestamp,
}

impl Message {
    /// Create a new message.
    pub fn new(
        id: MessageId,
        sender_id: UserId,
        room_id: RoomId,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            sender_id,
            room_id,
            content,
            created_at,
        }
    }
}
