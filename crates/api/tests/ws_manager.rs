//! Unit tests for `WsManager`.
//!
//! These exercise the connection and room registry directly, without any
//! HTTP upgrade.

use axum::extract::ws::Message;
use medvision_api::ws::WsManager;

fn text(body: &str) -> Message {
    Message::Text(body.to_string().into())
}

// ---------------------------------------------------------------------------
// Test: add() and remove() track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _rx1 = manager.add("conn-1".to_string()).await;
    let _rx2 = manager.add("conn-2".to_string()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("conn-1").await;
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: room broadcast reaches members only, in order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn room_broadcast_reaches_members_in_order() {
    let manager = WsManager::new();
    let mut member = manager.add("member".to_string()).await;
    let mut outsider = manager.add("outsider".to_string()).await;

    assert!(manager.join("member", "consult-1").await);
    assert!(manager.join("outsider", "consult-2").await);

    assert_eq!(manager.broadcast_to_room("consult-1", text("a"), None).await, 1);
    assert_eq!(manager.broadcast_to_room("consult-1", text("b"), None).await, 1);

    assert_eq!(member.try_recv().unwrap(), text("a"));
    assert_eq!(member.try_recv().unwrap(), text("b"));
    assert!(outsider.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: broadcast can exclude the sender
// ---------------------------------------------------------------------------

#[tokio::test]
async fn room_broadcast_skips_excluded_connection() {
    let manager = WsManager::new();
    let mut sender = manager.add("sender".to_string()).await;
    let mut peer = manager.add("peer".to_string()).await;
    manager.join("sender", "room").await;
    manager.join("peer", "room").await;

    let delivered = manager
        .broadcast_to_room("room", text("typing"), Some("sender"))
        .await;

    assert_eq!(delivered, 1);
    assert!(sender.try_recv().is_err());
    assert_eq!(peer.try_recv().unwrap(), text("typing"));
}

// ---------------------------------------------------------------------------
// Test: joining requires a live connection and is idempotent
// ---------------------------------------------------------------------------

#[tokio::test]
async fn join_is_idempotent_and_requires_connection() {
    let manager = WsManager::new();
    assert!(!manager.join("ghost", "room").await);

    let _rx = manager.add("conn".to_string()).await;
    manager.join("conn", "room").await;
    manager.join("conn", "room").await;
    assert_eq!(manager.room_size("room").await, 1);
}

// ---------------------------------------------------------------------------
// Test: remove() drops empty rooms
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_leaves_rooms() {
    let manager = WsManager::new();
    let _rx = manager.add("conn".to_string()).await;
    manager.join("conn", "room").await;

    manager.remove("conn").await;

    assert_eq!(manager.room_size("room").await, 0);
    assert_eq!(manager.broadcast_to_room("room", text("x"), None).await, 0);
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears everything
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();
    let mut rx1 = manager.add("conn-1".to_string()).await;
    let mut rx2 = manager.add("conn-2".to_string()).await;
    manager.join("conn-1", "room").await;

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);
    assert_eq!(manager.room_size("room").await, 0);
    assert!(matches!(rx1.recv().await, Some(Message::Close(None))));
    assert!(matches!(rx2.recv().await, Some(Message::Close(None))));
}

// ---------------------------------------------------------------------------
// Test: ping_all() queues a Ping for every connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ping_all_reaches_every_connection() {
    let manager = WsManager::new();
    let mut rx = manager.add("conn".to_string()).await;

    manager.ping_all().await;

    assert!(matches!(rx.try_recv(), Ok(Message::Ping(_))));
}
