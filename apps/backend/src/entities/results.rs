use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::plays::Choice;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "match_id")]
    pub match_id: i64,
    #[sea_orm(column_name = "winner_id")]
    pub winner_id: Option<i64>,
    #[sea_orm(column_name = "loser_id")]
    pub loser_id: Option<i64>,
    #[sea_orm(column_name = "is_draw")]
    pub is_draw: bool,
    #[sea_orm(column_name = "player1_choice")]
    pub player1_choice: Choice,
    #[sea_orm(column_name = "player2_choice")]
    pub player2_choice: Choice,
    #[sea_orm(column_name = "player1_score", column_type = "SmallInteger")]
    pub player1_score: i16,
    #[sea_orm(column_name = "player2_score", column_type = "SmallInteger")]
    pub player2_score: i16,
    #[sea_orm(column_name = "round_no", column_type = "SmallInteger")]
    pub round_no: i16,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id"
    )]
    Match,
}

impl Related<super::matches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
