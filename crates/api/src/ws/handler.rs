use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::state::AppState;
use crate::ws::manager::WsManager;
use crate::ws::protocol::{ClientEvent, ServerEvent};

/// GET /ws
///
/// Upgrades to a WebSocket managed by [`WsManager`].
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

/// Drive one socket: a spawned task forwards queued frames to the sink
/// while this task dispatches inbound events. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone()).await;
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() || closing {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(text.as_str()) {
                Ok(event) => dispatch(&ws_manager, &conn_id, event).await,
                Err(e) => {
                    tracing::debug!(conn_id = %conn_id, error = %e, "Ignoring malformed WebSocket event");
                }
            },
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

async fn dispatch(ws_manager: &WsManager, conn_id: &str, event: ClientEvent) {
    match event {
        ClientEvent::JoinConsultation { consultation_id } => {
            ws_manager.join(conn_id, &consultation_id).await;
            tracing::info!(conn_id, consultation_id = %consultation_id, "Joined consultation");
            let reply = ServerEvent::JoinedConsultation { consultation_id };
            if let Ok(frame) = reply.to_message() {
                ws_manager.send_to(conn_id, frame).await;
            }
        }
        ClientEvent::Typing {
            consultation_id,
            user_id,
            sender_type,
        } => {
            relay(
                ws_manager,
                conn_id,
                &consultation_id,
                ServerEvent::UserTyping { user_id, sender_type },
            )
            .await;
        }
        ClientEvent::StopTyping {
            consultation_id,
            user_id,
        } => {
            relay(
                ws_manager,
                conn_id,
                &consultation_id,
                ServerEvent::UserStopTyping { user_id },
            )
            .await;
        }
    }
}

/// Forward a typing indicator to everyone else in the room.
async fn relay(ws_manager: &WsManager, sender: &str, room: &str, event: ServerEvent) {
    match event.to_message() {
        Ok(frame) => {
            ws_manager.broadcast_to_room(room, frame, Some(sender)).await;
        }
        Err(e) => tracing::error!(error = %e, "Failed to encode WebSocket event"),
    }
}
