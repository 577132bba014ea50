//! DTOs for plays_sea adapter.

use crate::entities::plays::Choice;

/// DTO for creating a play.
#[derive(Debug, Clone)]
pub struct PlayCreate {
    pub match_id: i64,
    pub player_id: i64,
    pub choice: Choice,
    pub round_no: i16,
}
