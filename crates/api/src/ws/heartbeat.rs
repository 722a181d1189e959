use std::sync::Arc;
use std::time::Duration;

use crate::ws::manager::WsManager;

/// Default spacing of heartbeat pings.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// Spawn a task that pings every connection each `every`.
///
/// Runs until aborted through the returned handle (done on shutdown).
pub fn start_heartbeat(ws_manager: Arc<WsManager>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately; skip it so the first ping
        // goes out one interval after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let count = ws_manager.connection_count().await;
            if count > 0 {
                tracing::debug!(count, "WebSocket heartbeat ping");
                ws_manager.ping_all().await;
            }
        }
    })
}
