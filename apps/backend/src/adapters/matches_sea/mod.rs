//! SeaORM adapter for the matches table - generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, Set};

use crate::entities::matches;
use crate::entities::matches::MatchStatus;

pub mod dto;

pub use dto::{MatchCreate, MatchOutcome};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Find match by ID or return a structured not-found error.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("MATCH_NOT_FOUND:{match_id}")))
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let match_active = matches::ActiveModel {
        id: NotSet,
        room_id: Set(dto.room_id),
        game_mode: Set(dto.game_mode),
        status: Set(MatchStatus::Playing),
        winner_id: NotSet,
        loser_id: NotSet,
        is_draw: Set(false),
        player1_score: Set(0),
        player2_score: Set(0),
        created_at: Set(now),
        finished_at: NotSet,
    };

    match_active.insert(conn).await
}

/// Mark a match FINISHED with its outcome.
pub async fn update_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchOutcome,
) -> Result<matches::Model, sea_orm::DbErr> {
    let game_match = require_match(conn, dto.id).await?;
    let mut match_active: matches::ActiveModel = game_match.into();
    match_active.status = Set(MatchStatus::Finished);
    match_active.winner_id = Set(dto.winner_id);
    match_active.loser_id = Set(dto.loser_id);
    match_active.is_draw = Set(dto.is_draw);
    match_active.player1_score = Set(dto.player1_score);
    match_active.player2_score = Set(dto.player2_score);
    match_active.finished_at = Set(Some(dto.finished_at));
    match_active.update(conn).await
}
