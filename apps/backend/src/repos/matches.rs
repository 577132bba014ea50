//! Match repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::matches_sea as matches_adapter;
use crate::adapters::plays_sea as plays_adapter;
use crate::entities::matches;
use crate::entities::matches::MatchStatus;
use crate::entities::rooms::GameMode;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::plays::Play;

/// Match domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub id: i64,
    pub room_id: i64,
    pub game_mode: GameMode,
    pub status: MatchStatus,
    pub winner_id: Option<i64>,
    pub loser_id: Option<i64>,
    pub is_draw: bool,
    pub player1_score: i16,
    pub player2_score: i16,
    pub created_at: OffsetDateTime,
    pub finished_at: Option<OffsetDateTime>,
}

impl From<matches::Model> for Match {
    fn from(model: matches::Model) -> Self {
        Self {
            id: model.id,
            room_id: model.room_id,
            game_mode: model.game_mode,
            status: model.status,
            winner_id: model.winner_id,
            loser_id: model.loser_id,
            is_draw: model.is_draw,
            player1_score: model.player1_score,
            player2_score: model.player2_score,
            created_at: model.created_at,
            finished_at: model.finished_at,
        }
    }
}

/// A match together with its plays in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWithPlays {
    pub game_match: Match,
    pub plays: Vec<Play>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let game_match = matches_adapter::find_by_id(conn, match_id)
        .await
        .map_err(map_db_err)?;
    Ok(game_match.map(Match::from))
}

pub async fn create_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_id: i64,
    game_mode: GameMode,
) -> Result<Match, DomainError> {
    let game_match =
        matches_adapter::create_match(conn, matches_adapter::MatchCreate { room_id, game_mode })
            .await
            .map_err(map_db_err)?;
    Ok(Match::from(game_match))
}

/// Load a match and all of its plays; the plays arrive in submission order.
pub async fn find_match_with_plays<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<MatchWithPlays, DomainError> {
    let game_match = matches_adapter::require_match(conn, match_id)
        .await
        .map_err(map_db_err)?;
    let plays = plays_adapter::find_by_match(conn, match_id)
        .await
        .map_err(map_db_err)?;

    Ok(MatchWithPlays {
        game_match: Match::from(game_match),
        plays: plays.into_iter().map(Play::from).collect(),
    })
}

pub async fn update_outcome<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: matches_adapter::MatchOutcome,
) -> Result<Match, DomainError> {
    let game_match = matches_adapter::update_outcome(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Match::from(game_match))
}
