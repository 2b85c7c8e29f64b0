//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub users: Vec<String>,
}
