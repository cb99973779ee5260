//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use hiroma_shared::time::timestamp_to_rfc3339;

use crate::domain::{Message, Room};

/// Request body for room creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

/// Request body for adding a member to a room
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
}

/// Room representation returned by the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub members: Vec<String>,
    pub created_at: String,
}

impl From<&Room> for RoomDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            admin_id: room.admin_id.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|m| m.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

/// Message representation returned by the history endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub sender_id: String,
    pub room_id: String,
    pub content: String,
    pub created_at: String,
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            sender_id: message.sender_id.as_str().to_string(),
            room_id: message.room_id.as_str().to_string(),
            content: message.content.as_str().to_string(),
            created_at: timestamp_to_rfc3339(message.created_at.value()),
        }
    }
}
