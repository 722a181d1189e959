//! Handlers for consultation messaging, video calls and file sharing.
//!
//! Writes that other participants must see are pushed to the consultation's
//! WebSocket room after they are stored.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use validator::Validate;

use medvision_core::portal::{
    validate_file_type, validate_message_type, validate_sender_type, FILE_TYPE_DOCUMENT,
};
use medvision_store::models::file_share::{FileShare, NewFileShare};
use medvision_store::models::message::{CreateMessage, MarkRead, Message};
use medvision_store::models::video_call::{ScheduleVideoCall, VideoCall};
use medvision_store::repositories::{FileShareRepo, MessageRepo, VideoCallRepo};

use crate::error::{AppError, AppResult};
use crate::response::Success;
use crate::state::AppState;
use crate::upload::{UploadForm, SHARE_FIELD};
use crate::ws::ServerEvent;

/// Push `event` to every socket in the consultation room.
async fn notify_room(state: &AppState, consultation_id: &str, event: ServerEvent) {
    match event.to_message() {
        Ok(frame) => {
            let delivered = state
                .ws_manager
                .broadcast_to_room(consultation_id, frame, None)
                .await;
            tracing::debug!(consultation_id, delivered, "Room notified");
        }
        Err(e) => tracing::error!(error = %e, "Failed to encode WebSocket event"),
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
}

/// GET /api/messages/{consultation_id}
pub async fn list_messages(
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
) -> Json<Success<MessageList>> {
    let messages = MessageRepo::list_by_consultation(&state.store, &consultation_id).await;
    Json(Success::new(MessageList { messages }))
}

#[derive(Debug, Serialize)]
pub struct MessageSent {
    pub message: Message,
}

/// POST /api/messages
///
/// Stores the message, then broadcasts `new_message` to the room.
pub async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<Json<Success<MessageSent>>> {
    input.validate()?;
    validate_sender_type(&input.sender_type)?;
    if let Some(kind) = input.message_type.as_deref() {
        validate_message_type(kind)?;
    }

    let message = MessageRepo::create(&state.store, input).await;
    notify_room(
        &state,
        &message.consultation_id,
        ServerEvent::NewMessage {
            message: message.clone(),
        },
    )
    .await;

    Ok(Json(Success::new(MessageSent { message })))
}

#[derive(Debug, Serialize)]
pub struct MarkedRead {
    pub updated: usize,
}

/// POST /api/communication/mark-read
pub async fn mark_read(
    State(state): State<AppState>,
    Json(input): Json<MarkRead>,
) -> Json<Success<MarkedRead>> {
    let updated = MessageRepo::mark_read(&state.store, &input.message_ids).await;
    Json(Success::new(MarkedRead { updated }))
}

// ---------------------------------------------------------------------------
// POST /api/video-calls
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoCallScheduled {
    pub video_call: VideoCall,
}

/// Schedule a call and broadcast `video_call_scheduled`.
pub async fn schedule_video_call(
    State(state): State<AppState>,
    Json(input): Json<ScheduleVideoCall>,
) -> AppResult<Json<Success<VideoCallScheduled>>> {
    input.validate()?;
    let video_call = VideoCallRepo::create(&state.store, input).await;
    tracing::info!(call_id = %video_call.id, consultation_id = %video_call.consultation_id, "Video call scheduled");

    notify_room(
        &state,
        &video_call.consultation_id,
        ServerEvent::VideoCallScheduled {
            video_call: video_call.clone(),
        },
    )
    .await;

    Ok(Json(Success::new(VideoCallScheduled { video_call })))
}

// ---------------------------------------------------------------------------
// File shares
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileShared {
    pub file_share: FileShare,
}

/// POST /api/file-shares
///
/// Multipart with a `file` part plus `consultationId`, `uploadedBy` and
/// optional `fileType` and `description`. Broadcasts `file_shared`.
pub async fn share_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<Success<FileShared>>> {
    let mut form = UploadForm::read(
        multipart,
        SHARE_FIELD,
        &state.config.upload_dir,
        state.config.max_upload_bytes,
    )
    .await?;
    let file = form.require_file("No file provided")?;

    let consultation_id = form
        .text("consultationId")
        .ok_or_else(|| AppError::BadRequest("consultationId is required".into()))?
        .to_string();
    let uploaded_by = form
        .text("uploadedBy")
        .ok_or_else(|| AppError::BadRequest("uploadedBy is required".into()))?
        .to_string();
    let file_type = form.text("fileType").unwrap_or(FILE_TYPE_DOCUMENT).to_string();
    validate_file_type(&file_type)?;

    let file_share = FileShareRepo::create(
        &state.store,
        NewFileShare {
            consultation_id,
            uploaded_by,
            file_name: file.original_name.clone(),
            file_type,
            file_url: file.url(),
            file_size: file.size,
            description: form.text("description").map(str::to_string),
        },
    )
    .await;

    notify_room(
        &state,
        &file_share.consultation_id,
        ServerEvent::FileShared {
            file_share: file_share.clone(),
        },
    )
    .await;

    Ok(Json(Success::new(FileShared { file_share })))
}

#[derive(Debug, Serialize)]
pub struct FileList {
    pub files: Vec<FileShare>,
}

/// GET /api/communication/files/{consultation_id}
pub async fn list_files(
    State(state): State<AppState>,
    Path(consultation_id): Path<String>,
) -> Json<Success<FileList>> {
    let files = FileShareRepo::list_by_consultation(&state.store, &consultation_id).await;
    Json(Success::new(FileList { files }))
}
