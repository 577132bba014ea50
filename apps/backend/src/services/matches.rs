//! Match engine: creation, play submission, round resolution and rematch
//! support.
//!
//! Round numbering is derived purely from the count of recorded plays, so
//! resolution stays deterministic under message reordering as long as
//! duplicate-play rejection holds. One round decides the match.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::matches_sea::MatchOutcome;
use crate::adapters::plays_sea::PlayCreate;
use crate::adapters::results_sea::ResultCreate;
use crate::domain::rounds::{latest_round, submission_round};
use crate::domain::rules::{is_valid_choice, resolve, RoundOutcome};
use crate::entities::matches::MatchStatus;
use crate::entities::plays::Choice;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::matches as matches_repo;
use crate::repos::matches::Match;
use crate::repos::plays as plays_repo;
use crate::repos::plays::Play;
use crate::repos::results as results_repo;
use crate::repos::results::RoundResult;
use crate::repos::rooms::Room;

/// Start a match for a room. The game mode is copied from the room at
/// creation and is immutable for the lifetime of the match.
pub async fn start_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room: &Room,
) -> Result<Match, AppError> {
    if room.player_ids.len() != 2 {
        return Err(AppError::invalid_state(
            ErrorCode::InvalidRoomState,
            format!(
                "Room {} needs exactly 2 players to start a match, has {}",
                room.id,
                room.player_ids.len()
            ),
        ));
    }
    Ok(matches_repo::create_match(conn, room.id, room.game_mode).await?)
}

/// Record one player's play for the current round. The durable write is an
/// observable side effect even when the round is not yet complete.
pub async fn submit_play<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
    player_id: i64,
    choice: Choice,
) -> Result<Play, AppError> {
    let current = matches_repo::find_match_with_plays(conn, match_id).await?;

    if current.game_match.status != MatchStatus::Playing {
        return Err(AppError::invalid_state(
            ErrorCode::NoActiveMatch,
            format!("Match {match_id} is not in progress"),
        ));
    }

    if !is_valid_choice(current.game_match.game_mode, choice) {
        return Err(AppError::invalid(
            ErrorCode::InvalidChoice,
            format!(
                "{choice:?} is not a valid choice for {:?} mode",
                current.game_match.game_mode
            ),
        ));
    }

    let round_no = submission_round(current.plays.len());
    if is_duplicate_play(&current.plays, player_id, round_no) {
        return Err(AppError::conflict(
            ErrorCode::DuplicatePlay,
            format!("Player {player_id} already played round {round_no} of match {match_id}"),
        ));
    }

    let play = plays_repo::create_play(
        conn,
        PlayCreate {
            match_id,
            player_id,
            choice,
            round_no,
        },
    )
    .await?;
    Ok(play)
}

/// Outcome of a round-completion check.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundCheck {
    /// The current round is still missing a play; nothing was written.
    Incomplete,
    /// The round resolved: the match is finalized and a result recorded.
    Complete {
        game_match: Match,
        result: RoundResult,
        plays: Vec<Play>,
    },
}

/// Resolve the current round if both plays are present. A round resolves iff
/// exactly two plays from distinct players exist for the round of the most
/// recent play; otherwise this is a pure read.
pub async fn check_round_complete<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<RoundCheck, AppError> {
    let current = matches_repo::find_match_with_plays(conn, match_id).await?;
    if current.game_match.status != MatchStatus::Playing {
        return Ok(RoundCheck::Incomplete);
    }

    let Some(round_no) = latest_round(current.plays.len()) else {
        return Ok(RoundCheck::Incomplete);
    };

    let Some((play1, play2)) = round_plays(&current.plays, round_no) else {
        return Ok(RoundCheck::Incomplete);
    };

    let outcome = resolve(play1.choice, play2.choice);
    let scored = score_round(outcome, play1, play2);

    let result = results_repo::create_result(
        conn,
        ResultCreate {
            match_id,
            winner_id: scored.winner_id,
            loser_id: scored.loser_id,
            is_draw: scored.is_draw,
            player1_choice: play1.choice,
            player2_choice: play2.choice,
            player1_score: scored.player1_score,
            player2_score: scored.player2_score,
            round_no,
        },
    )
    .await?;

    let game_match = matches_repo::update_outcome(
        conn,
        MatchOutcome {
            id: match_id,
            winner_id: scored.winner_id,
            loser_id: scored.loser_id,
            is_draw: scored.is_draw,
            player1_score: scored.player1_score,
            player2_score: scored.player2_score,
            finished_at: OffsetDateTime::now_utc(),
        },
    )
    .await?;

    Ok(RoundCheck::Complete {
        game_match,
        result,
        plays: vec![play1.clone(), play2.clone()],
    })
}

/// Whether a player already has a play recorded for a round. Duplicate
/// submissions are rejected rather than overwritten.
fn is_duplicate_play(plays: &[Play], player_id: i64, round_no: i16) -> bool {
    plays
        .iter()
        .any(|p| p.round_no == round_no && p.player_id == player_id)
}

/// The two plays of a round, in submission order, iff exactly two exist and
/// they come from distinct players.
fn round_plays(plays: &[Play], round_no: i16) -> Option<(&Play, &Play)> {
    let mut of_round = plays.iter().filter(|p| p.round_no == round_no);
    let first = of_round.next()?;
    let second = of_round.next()?;
    if of_round.next().is_some() || first.player_id == second.player_id {
        return None;
    }
    Some((first, second))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScoredRound {
    winner_id: Option<i64>,
    loser_id: Option<i64>,
    is_draw: bool,
    player1_score: i16,
    player2_score: i16,
}

/// Map a resolved pair of choices back onto the players who made them.
/// "Player 1" is whoever played first within the round.
fn score_round(outcome: RoundOutcome, play1: &Play, play2: &Play) -> ScoredRound {
    match outcome {
        RoundOutcome::Draw => ScoredRound {
            winner_id: None,
            loser_id: None,
            is_draw: true,
            player1_score: 0,
            player2_score: 0,
        },
        RoundOutcome::Decided { winner, .. } if winner == play1.choice => ScoredRound {
            winner_id: Some(play1.player_id),
            loser_id: Some(play2.player_id),
            is_draw: false,
            player1_score: 1,
            player2_score: 0,
        },
        RoundOutcome::Decided { .. } => ScoredRound {
            winner_id: Some(play2.player_id),
            loser_id: Some(play1.player_id),
            is_draw: false,
            player1_score: 0,
            player2_score: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(player_id: i64, choice: Choice) -> Play {
        play_in_round(player_id, choice, 1)
    }

    fn play_in_round(player_id: i64, choice: Choice, round_no: i16) -> Play {
        Play {
            id: 0,
            match_id: 1,
            player_id,
            choice,
            round_no,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn winner_is_the_player_who_made_the_winning_choice() {
        let p1 = play(10, Choice::Rock);
        let p2 = play(20, Choice::Scissors);
        let scored = score_round(resolve(p1.choice, p2.choice), &p1, &p2);
        assert_eq!(scored.winner_id, Some(10));
        assert_eq!(scored.loser_id, Some(20));
        assert_eq!((scored.player1_score, scored.player2_score), (1, 0));
        assert!(!scored.is_draw);
    }

    #[test]
    fn second_player_can_win() {
        let p1 = play(10, Choice::Spock);
        let p2 = play(20, Choice::Lizard);
        let scored = score_round(resolve(p1.choice, p2.choice), &p1, &p2);
        assert_eq!(scored.winner_id, Some(20));
        assert_eq!(scored.loser_id, Some(10));
        assert_eq!((scored.player1_score, scored.player2_score), (0, 1));
    }

    #[test]
    fn draw_scores_nobody() {
        let p1 = play(10, Choice::Paper);
        let p2 = play(20, Choice::Paper);
        let scored = score_round(resolve(p1.choice, p2.choice), &p1, &p2);
        assert!(scored.is_draw);
        assert_eq!(scored.winner_id, None);
        assert_eq!(scored.loser_id, None);
        assert_eq!((scored.player1_score, scored.player2_score), (0, 0));
    }

    #[test]
    fn second_play_for_the_same_round_is_a_duplicate() {
        let plays = vec![play(10, Choice::Rock)];
        assert!(is_duplicate_play(&plays, 10, 1));
        // The other player may still play the round.
        assert!(!is_duplicate_play(&plays, 20, 1));
        // A new round starts the count over.
        assert!(!is_duplicate_play(&plays, 10, 2));
    }

    #[test]
    fn round_resolves_only_with_two_distinct_player_plays() {
        assert_eq!(round_plays(&[], 1), None);

        let one = vec![play(10, Choice::Rock)];
        assert_eq!(round_plays(&one, 1), None);

        // Two plays from the same player never resolve the round.
        let same_player = vec![play(10, Choice::Rock), play(10, Choice::Paper)];
        assert_eq!(round_plays(&same_player, 1), None);

        let full = vec![play(10, Choice::Rock), play(20, Choice::Scissors)];
        let (first, second) = round_plays(&full, 1).unwrap();
        assert_eq!(first.player_id, 10);
        assert_eq!(second.player_id, 20);
    }

    #[test]
    fn round_selection_ignores_other_rounds() {
        let plays = vec![
            play_in_round(10, Choice::Rock, 1),
            play_in_round(20, Choice::Rock, 1),
            play_in_round(10, Choice::Spock, 2),
        ];
        // Round 2 is still missing its second play.
        assert_eq!(round_plays(&plays, 2), None);

        let (first, second) = round_plays(&plays, 1).unwrap();
        assert_eq!(first.choice, Choice::Rock);
        assert_eq!(second.player_id, 20);
    }
}
