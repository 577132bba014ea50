//! DTOs for results_sea adapter.

use crate::entities::plays::Choice;

/// DTO for recording a resolved round.
#[derive(Debug, Clone)]
pub struct ResultCreate {
    pub match_id: i64,
    pub winner_id: Option<i64>,
    pub loser_id: Option<i64>,
    pub is_draw: bool,
    pub player1_choice: Choice,
    pub player2_choice: Choice,
    pub player1_score: i16,
    pub player2_score: i16,
    pub round_no: i16,
}
