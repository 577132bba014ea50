//! Room repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::rooms_sea as rooms_adapter;
use crate::entities::rooms;
use crate::entities::rooms::{GameMode, PlayerIds, RoomStatus};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Room domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: i64,
    pub invite_code: String,
    pub created_by: i64,
    pub game_mode: GameMode,
    pub status: RoomStatus,
    pub player_ids: Vec<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<rooms::Model> for Room {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            invite_code: model.invite_code,
            created_by: model.created_by,
            game_mode: model.game_mode,
            status: model.status,
            player_ids: model.player_ids.0,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<Room>, DomainError> {
    let room = rooms_adapter::find_by_id(conn, room_id)
        .await
        .map_err(map_db_err)?;
    Ok(room.map(Room::from))
}

/// Find room by ID or return a domain not-found error.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::require_room(conn, room_id)
        .await
        .map_err(map_db_err)?;
    Ok(Room::from(room))
}

/// Invite codes are case-insensitive: normalized to uppercase here and at
/// creation.
pub async fn find_by_invite_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    invite_code: &str,
) -> Result<Option<Room>, DomainError> {
    let normalized = invite_code.trim().to_uppercase();
    let room = rooms_adapter::find_by_invite_code(conn, &normalized)
        .await
        .map_err(map_db_err)?;
    Ok(room.map(Room::from))
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: rooms_adapter::RoomCreate,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::create_room(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Room::from(room))
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    status: RoomStatus,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::update_status(conn, room_id, status)
        .await
        .map_err(map_db_err)?;
    Ok(Room::from(room))
}

/// Replace membership and status in one durable write.
pub async fn update_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    player_ids: Vec<i64>,
    status: RoomStatus,
) -> Result<Room, DomainError> {
    let room = rooms_adapter::update_players(
        conn,
        rooms_adapter::RoomUpdatePlayers {
            id: room_id,
            player_ids: PlayerIds(player_ids),
            status,
        },
    )
    .await
    .map_err(map_db_err)?;
    Ok(Room::from(room))
}
