use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medvision_ai::{build_generator, AiConfig};
use medvision_api::config::ServerConfig;
use medvision_api::router::build_app_router;
use medvision_api::state::AppState;
use medvision_api::ws;
use medvision_imaging::LocalFilterEngine;
use medvision_landmarks::{FaceMeshDetector, LandmarkConfig};
use medvision_store::MemStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medvision_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    // --- Store ---
    let store = MemStore::new();
    let seeded = medvision_store::seed::seed_doctors(&store).await;
    tracing::info!(seeded, "In-memory store ready");

    // --- Processing backends ---
    let generator = build_generator(&AiConfig::from_env());
    let engine = Arc::new(LocalFilterEngine::new(config.upload_dir.clone()));
    let landmarks = Arc::new(FaceMeshDetector::new(LandmarkConfig::from_env()));

    // --- WebSocket manager ---
    let ws_manager = Arc::new(ws::WsManager::new());

    // --- Heartbeat ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager), ws::HEARTBEAT_INTERVAL);

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        generator,
        engine,
        landmarks,
    };

    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be a valid IP address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {addr}: {e}"));
    tracing::info!(%addr, "MedVision API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Shutdown ---
    let open_sockets = ws_manager.connection_count().await;
    tracing::info!(open_sockets, "HTTP server stopped, closing consultation sockets");
    ws_manager.shutdown_all().await;
    heartbeat_handle.abort();
    tracing::info!("Shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal = tokio::select! {
        () = ctrl_c => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down");
}
