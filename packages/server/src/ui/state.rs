//! Server state and connection handshake parameters.

use serde::Deserialize;
use std::sync::Arc;

use crate::{domain::RoomRepository, infrastructure::repository::InMemoryRoomRepository};

/// Query parameters of the WebSocket handshake
///
/// Both fields are optional here so that a missing one reaches the gateway
/// and is rejected as an invalid join.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectQuery {
    pub room_id: Option<String>,
    pub user_name: Option<String>,
}

/// Shared application state
///
/// One instance per server; tests build their own for isolation.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// State backed by a fresh in-memory registry
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryRoomRepository::new()))
    }
}
