//! Repository for consultation chat messages.

use chrono::Utc;
use medvision_core::portal::MESSAGE_TEXT;
use medvision_core::types::EntityId;
use uuid::Uuid;

use crate::models::message::{CreateMessage, Message};
use crate::store::Store;

pub struct MessageRepo;

impl MessageRepo {
    /// Append an unread message. `message_type` defaults to `text`.
    pub async fn create(store: &Store, input: CreateMessage) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            consultation_id: input.consultation_id,
            sender_id: input.sender_id,
            sender_type: input.sender_type,
            content: input.content,
            message_type: input
                .message_type
                .unwrap_or_else(|| MESSAGE_TEXT.to_string()),
            attachment_url: input.attachment_url,
            is_read: false,
            reply_to_message_id: input.reply_to_message_id,
            timestamp: Utc::now(),
        };
        store.messages.write().await.push(message.clone());
        message
    }

    /// Messages of one consultation in send order.
    pub async fn list_by_consultation(store: &Store, consultation_id: &str) -> Vec<Message> {
        store
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.consultation_id == consultation_id)
            .cloned()
            .collect()
    }

    /// Mark the given messages read. Unknown ids are ignored.
    ///
    /// Returns the number of messages that changed state.
    pub async fn mark_read(store: &Store, ids: &[EntityId]) -> usize {
        let mut table = store.messages.write().await;
        let mut changed = 0;
        for message in table.iter_mut().filter(|m| ids.contains(&m.id)) {
            if !message.is_read {
                message.is_read = true;
                changed += 1;
            }
        }
        changed
    }
}
