//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    domain::{RoomName, Username},
    infrastructure::dto::http::RoomSummaryDto,
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the room directory with each room's current occupants
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let rooms = state.directory.list().await.map_err(|e| {
        tracing::error!("room list read failed: {e}");
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let registry = state.registry.lock().await;
    let summaries = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            users: registry
                .snapshot(&room)
                .into_iter()
                .map(Username::into_string)
                .collect(),
            name: RoomName::into_string(room),
        })
        .collect();

    Ok(Json(summaries))
}
