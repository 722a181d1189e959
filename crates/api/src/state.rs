use std::sync::Arc;

use medvision_ai::RemoteGenerator;
use medvision_imaging::LocalFilterEngine;
use medvision_landmarks::FaceMeshDetector;
use medvision_store::Store;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// In-memory record store.
    pub store: Store,
    pub config: Arc<ServerConfig>,
    /// WebSocket connections and consultation rooms.
    pub ws_manager: Arc<WsManager>,
    /// Hosted generation; offline when no API key is configured.
    pub generator: Arc<dyn RemoteGenerator>,
    /// Local filter chains, writing into the upload directory.
    pub engine: Arc<LocalFilterEngine>,
    pub landmarks: Arc<FaceMeshDetector>,
}
