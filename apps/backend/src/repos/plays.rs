//! Play repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::plays_sea as plays_adapter;
use crate::entities::plays;
use crate::entities::plays::Choice;
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Play domain model, converted from the database row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Play {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub choice: Choice,
    pub round_no: i16,
    pub created_at: OffsetDateTime,
}

impl From<plays::Model> for Play {
    fn from(model: plays::Model) -> Self {
        Self {
            id: model.id,
            match_id: model.match_id,
            player_id: model.player_id,
            choice: model.choice,
            round_no: model.round_no,
            created_at: model.created_at,
        }
    }
}

pub async fn create_play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: plays_adapter::PlayCreate,
) -> Result<Play, DomainError> {
    let play = plays_adapter::create_play(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Play::from(play))
}
