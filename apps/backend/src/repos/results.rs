//! Round result repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::results_sea as results_adapter;
use crate::entities::plays::Choice;
use crate::entities::results;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Resolved round domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundResult {
    pub id: i64,
    pub match_id: i64,
    pub winner_id: Option<i64>,
    pub loser_id: Option<i64>,
    pub is_draw: bool,
    pub player1_choice: Choice,
    pub player2_choice: Choice,
    pub player1_score: i16,
    pub player2_score: i16,
    pub round_no: i16,
    pub created_at: OffsetDateTime,
}

impl From<results::Model> for RoundResult {
    fn from(model: results::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            winner_id: model.winner_id,
            loser_id: model.loser_id,
            is_draw: model.is_draw,
            player1_choice: model.player1_choice,
            player2_choice: model.player2_choice,
            player1_score: model.player1_score,
            player2_score: model.player2_score,
            round_no: model.round_no,
            created_at: model.created_at,
        }
    }
}

pub async fn create_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: results_adapter::ResultCreate,
) -> Result<RoundResult, DomainError> {
    let result = results_adapter::create_result(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(RoundResult::from(result))
}
