use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use medvision_core::types::Timestamp;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One open socket.
pub struct WsConnection {
    /// Outbound channel, drained by the connection's sender task.
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Tracks open sockets and the consultation rooms they joined.
///
/// Lock order is `rooms` before `connections` wherever both are held.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
    /// Consultation id to member connection ids. Empty rooms are dropped.
    rooms: RwLock<HashMap<String, HashSet<String>>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver its sender task drains.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection and its room memberships.
    pub async fn remove(&self, conn_id: &str) {
        let mut rooms = self.rooms.write().await;
        rooms.retain(|_, members| {
            members.remove(conn_id);
            !members.is_empty()
        });
        self.connections.write().await.remove(conn_id);
    }

    /// Put a connection into a consultation room. Joining twice is a no-op.
    ///
    /// Returns `false` if the connection is unknown.
    pub async fn join(&self, conn_id: &str, room: &str) -> bool {
        let mut rooms = self.rooms.write().await;
        if !self.connections.read().await.contains_key(conn_id) {
            return false;
        }
        rooms
            .entry(room.to_string())
            .or_default()
            .insert(conn_id.to_string());
        true
    }

    /// Send to one connection. Returns `false` if it is gone.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        self.connections
            .read()
            .await
            .get(conn_id)
            .is_some_and(|conn| conn.sender.send(message).is_ok())
    }

    /// Send to every member of `room` except `exclude`.
    ///
    /// Returns the number of connections the message was queued for.
    /// Closed channels are skipped; their sockets clean up on disconnect.
    pub async fn broadcast_to_room(&self, room: &str, message: Message, exclude: Option<&str>) -> usize {
        let rooms = self.rooms.read().await;
        let Some(members) = rooms.get(room) else {
            return 0;
        };
        let conns = self.connections.read().await;
        members
            .iter()
            .filter(|id| Some(id.as_str()) != exclude)
            .filter_map(|id| conns.get(id))
            .filter(|conn| conn.sender.send(message.clone()).is_ok())
            .count()
    }

    /// Send to every connection.
    pub async fn broadcast(&self, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(message.clone());
        }
    }

    pub async fn room_size(&self, room: &str) -> usize {
        self.rooms.read().await.get(room).map_or(0, HashSet::len)
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then forget all connections
    /// and rooms.
    pub async fn shutdown_all(&self) {
        let mut rooms = self.rooms.write().await;
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        rooms.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Queue a Ping frame for every connection.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
