//! Server runner: router assembly, seeding, and lifecycle.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{RESERVED_ROOMS, RoomDirectory, RoomName, StoreError, Username, ValueObjectError},
    infrastructure::repository::{InMemoryMessageStore, InMemoryRoomDirectory},
    ui::{
        handler::{get_rooms, health_check, websocket_handler},
        state::AppState,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValueObjectError),
    #[error("seeding failed: {0}")]
    Seed(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the router over a fully constructed state.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/rooms", get(get_rooms))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Insert the reserved rooms so they exist before any client connects.
/// Idempotent: an already present room is left alone.
async fn seed_reserved_rooms(directory: &dyn RoomDirectory) -> Result<(), ServerError> {
    for name in RESERVED_ROOMS {
        let room = RoomName::new(name.to_string())?;
        if !directory.contains(&room).await? {
            directory.insert(room).await?;
        }
    }
    Ok(())
}

/// Run the relay server until ctrl-c.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let directory = Arc::new(InMemoryRoomDirectory::new());
    let messages = Arc::new(InMemoryMessageStore::new());
    seed_reserved_rooms(directory.as_ref()).await?;

    let admin = Username::new(config.admin.clone())?;
    let state = Arc::new(AppState::new(
        directory,
        messages,
        admin,
        config.history_limit,
    ));
    let app = create_app(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}
