//! JSON events exchanged over `/ws`.
//!
//! Both directions use an internally tagged `type` field:
//!
//! ```text
//! client -> server   join_consultation { consultationId }
//!                    typing            { consultationId, userId, senderType? }
//!                    stop_typing       { consultationId, userId }
//! server -> client   joined_consultation { consultationId }
//!                    new_message         { message }
//!                    user_typing         { userId, senderType? }
//!                    user_stop_typing    { userId }
//!                    video_call_scheduled { videoCall }
//!                    file_shared         { fileShare }
//! ```

use axum::extract::ws::Message;
use medvision_store::models::file_share::FileShare;
use medvision_store::models::message::Message as ChatMessage;
use medvision_store::models::video_call::VideoCall;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinConsultation { consultation_id: String },
    #[serde(rename_all = "camelCase")]
    Typing {
        consultation_id: String,
        user_id: String,
        sender_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    StopTyping {
        consultation_id: String,
        user_id: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    JoinedConsultation { consultation_id: String },
    NewMessage { message: ChatMessage },
    #[serde(rename_all = "camelCase")]
    UserTyping {
        user_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        sender_type: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    UserStopTyping { user_id: String },
    #[serde(rename_all = "camelCase")]
    VideoCallScheduled { video_call: VideoCall },
    #[serde(rename_all = "camelCase")]
    FileShared { file_share: FileShare },
}

impl ServerEvent {
    /// Encode as a text frame.
    pub fn to_message(&self) -> Result<Message, serde_json::Error> {
        Ok(Message::Text(serde_json::to_string(self)?.into()))
    }
}
