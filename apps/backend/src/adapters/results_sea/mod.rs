//! SeaORM adapter for the results table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, NotSet, Set};

use crate::entities::results;

pub mod dto;

pub use dto::ResultCreate;

pub async fn create_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ResultCreate,
) -> Result<results::Model, sea_orm::DbErr> {
    let result_active = results::ActiveModel {
        id: NotSet,
        match_id: Set(dto.match_id),
        winner_id: Set(dto.winner_id),
        loser_id: Set(dto.loser_id),
        is_draw: Set(dto.is_draw),
        player1_choice: Set(dto.player1_choice),
        player2_choice: Set(dto.player2_choice),
        player1_score: Set(dto.player1_score),
        player2_score: Set(dto.player2_score),
        round_no: Set(dto.round_no),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    result_active.insert(conn).await
}
