//! Shared application state.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::game_flow::GameFlow;
use crate::services::live_rooms::LiveRooms;
use crate::ws::hub::GameHub;

/// Application state shared across HTTP handlers and websocket sessions.
pub struct AppState {
    pub db: DatabaseConnection,
    pub hub: Arc<GameHub>,
    pub live: Arc<LiveRooms>,
    pub flow: Arc<GameFlow>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let hub = Arc::new(GameHub::new());
        let live = Arc::new(LiveRooms::new());
        let flow = Arc::new(GameFlow::new(db.clone(), hub.clone(), live.clone()));
        Self {
            db,
            hub,
            live,
            flow,
        }
    }
}
