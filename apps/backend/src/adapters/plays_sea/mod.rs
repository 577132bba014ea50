//! SeaORM adapter for the plays table - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::plays;

pub mod dto;

pub use dto::PlayCreate;

pub async fn create_play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayCreate,
) -> Result<plays::Model, sea_orm::DbErr> {
    let play_active = plays::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        player_id: Set(dto.player_id),
        choice: Set(dto.choice),
        round_no: Set(dto.round_no),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    play_active.insert(conn).await
}

/// All plays of a match in submission order.
pub async fn find_by_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<plays::Model>, sea_orm::DbErr> {
    plays::Entity::find()
        .filter(plays::Column::MatchId.eq(match_id))
        .order_by_asc(plays::Column::Id)
        .all(conn)
        .await
}
