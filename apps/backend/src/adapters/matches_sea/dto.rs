//! DTOs for matches_sea adapter.

use time::OffsetDateTime;

use crate::entities::rooms::GameMode;

/// DTO for creating a match.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub room_id: i64,
    pub game_mode: GameMode,
}

/// DTO for finalizing a match once its round resolved.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub id: i64,
    pub winner_id: Option<i64>,
    pub loser_id: Option<i64>,
    pub is_draw: bool,
    pub player1_score: i16,
    pub player2_score: i16,
    pub finished_at: OffsetDateTime,
}
