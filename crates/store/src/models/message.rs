//! Chat message inside a consultation room.

use medvision_core::types::{EntityId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    pub consultation_id: String,
    pub sender_id: String,
    pub sender_type: String,
    pub content: String,
    pub message_type: String,
    pub attachment_url: Option<String>,
    pub is_read: bool,
    pub reply_to_message_id: Option<EntityId>,
    pub timestamp: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessage {
    #[serde(default)]
    #[validate(length(min = 1, message = "consultationId is required"))]
    pub consultation_id: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "senderId is required"))]
    pub sender_id: String,
    #[serde(default)]
    pub sender_type: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    pub message_type: Option<String>,
    pub attachment_url: Option<String>,
    pub reply_to_message_id: Option<EntityId>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkRead {
    pub message_ids: Vec<EntityId>,
}
