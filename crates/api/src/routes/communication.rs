//! Route definitions for consultation messaging and sharing.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::communication;
use crate::state::AppState;

/// ```text
/// POST /messages                               -> send_message
/// GET  /messages/{consultation_id}             -> list_messages
/// POST /communication/mark-read                -> mark_read
/// GET  /communication/files/{consultation_id}  -> list_files
/// POST /video-calls                            -> schedule_video_call
/// POST /file-shares                            -> share_file
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(communication::send_message))
        .route(
            "/messages/{consultation_id}",
            get(communication::list_messages),
        )
        .route("/communication/mark-read", post(communication::mark_read))
        .route(
            "/communication/files/{consultation_id}",
            get(communication::list_files),
        )
        .route("/video-calls", post(communication::schedule_video_call))
        .route("/file-shares", post(communication::share_file))
}
