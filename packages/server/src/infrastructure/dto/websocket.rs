//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

/// Inbound chat frame from a client.
///
/// Carries content only: sender and room are assigned server-side from the
/// authenticated connection and are never trusted from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatFrame {
    pub content: String,
}
