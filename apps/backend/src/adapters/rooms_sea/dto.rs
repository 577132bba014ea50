//! DTOs for rooms_sea adapter.

use crate::entities::rooms::{GameMode, PlayerIds, RoomStatus};

/// DTO for creating a room.
#[derive(Debug, Clone)]
pub struct RoomCreate {
    pub invite_code: String,
    pub created_by: i64,
    pub game_mode: GameMode,
}

/// DTO for replacing a room's membership and status in one write.
#[derive(Debug, Clone)]
pub struct RoomUpdatePlayers {
    pub id: i64,
    pub player_ids: PlayerIds,
    pub status: RoomStatus,
}
