//! SeaORM adapter for the rooms table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::rooms;
use crate::entities::rooms::{PlayerIds, RoomStatus};

pub mod dto;

pub use dto::{RoomCreate, RoomUpdatePlayers};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find_by_id(room_id).one(conn).await
}

/// Find room by ID or return a structured not-found error.
pub async fn require_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
) -> Result<rooms::Model, sea_orm::DbErr> {
    find_by_id(conn, room_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("ROOM_NOT_FOUND:{room_id}")))
}

/// Invite codes are stored uppercase; callers normalize before lookup.
pub async fn find_by_invite_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    invite_code: &str,
) -> Result<Option<rooms::Model>, sea_orm::DbErr> {
    rooms::Entity::find()
        .filter(rooms::Column::InviteCode.eq(invite_code))
        .one(conn)
        .await
}

pub async fn create_room<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomCreate,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let room_active = rooms::ActiveModel {
        id: NotSet,
        invite_code: Set(dto.invite_code),
        created_by: Set(dto.created_by),
        game_mode: Set(dto.game_mode),
        status: Set(RoomStatus::Waiting),
        player_ids: Set(PlayerIds(vec![dto.created_by])),
        created_at: Set(now),
        updated_at: Set(now),
    };

    room_active.insert(conn).await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    status: RoomStatus,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let room = require_room(conn, room_id).await?;
    let mut room_active: rooms::ActiveModel = room.into();
    room_active.status = Set(status);
    room_active.updated_at = Set(time::OffsetDateTime::now_utc());
    room_active.update(conn).await
}

/// Replace membership and status in a single durable write.
pub async fn update_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoomUpdatePlayers,
) -> Result<rooms::Model, sea_orm::DbErr> {
    let room = require_room(conn, dto.id).await?;
    let mut room_active: rooms::ActiveModel = room.into();
    room_active.player_ids = Set(dto.player_ids);
    room_active.status = Set(dto.status);
    room_active.updated_at = Set(time::OffsetDateTime::now_utc());
    room_active.update(conn).await
}
