//! WebSocket infrastructure for the consultation portal.
//!
//! Provides connection and room management, the JSON event protocol,
//! heartbeat pings and the HTTP upgrade handler mounted at `/ws`.

mod handler;
mod heartbeat;
pub mod manager;
pub mod protocol;

pub use handler::ws_handler;
pub use heartbeat::{start_heartbeat, HEARTBEAT_INTERVAL};
pub use manager::WsManager;
pub use protocol::{ClientEvent, ServerEvent};
