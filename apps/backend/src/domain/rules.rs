//! Rule engine for classic and extended rock-paper-scissors.
//!
//! Pure functions over [`Choice`] and [`GameMode`]; player identities are
//! mapped back onto the outcome by the caller.

use crate::entities::plays::Choice;
use crate::entities::rooms::GameMode;

pub const CLASSIC_CHOICES: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

pub const EXTENDED_CHOICES: [Choice; 5] = [
    Choice::Rock,
    Choice::Paper,
    Choice::Scissors,
    Choice::Lizard,
    Choice::Spock,
];

/// Outcome of resolving one round's pair of choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Draw,
    Decided { winner: Choice, loser: Choice },
}

/// The two choices each sign beats. Every sign beats exactly two others and
/// loses to the remaining two.
const fn beats(choice: Choice) -> [Choice; 2] {
    match choice {
        Choice::Rock => [Choice::Scissors, Choice::Lizard],
        Choice::Paper => [Choice::Rock, Choice::Spock],
        Choice::Scissors => [Choice::Paper, Choice::Lizard],
        Choice::Lizard => [Choice::Spock, Choice::Paper],
        Choice::Spock => [Choice::Scissors, Choice::Rock],
    }
}

/// Allowed choices for a game mode.
pub fn allowed_choices(mode: GameMode) -> &'static [Choice] {
    match mode {
        GameMode::Classic => &CLASSIC_CHOICES,
        GameMode::Extended => &EXTENDED_CHOICES,
    }
}

pub fn is_valid_choice(mode: GameMode, choice: Choice) -> bool {
    allowed_choices(mode).contains(&choice)
}

/// Resolve a round. Equal choices draw; otherwise exactly one of the two
/// choices beats the other.
pub fn resolve(a: Choice, b: Choice) -> RoundOutcome {
    if a == b {
        return RoundOutcome::Draw;
    }
    if beats(a).contains(&b) {
        RoundOutcome::Decided { winner: a, loser: b }
    } else {
        RoundOutcome::Decided { winner: b, loser: a }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rock_beats_scissors() {
        assert_eq!(
            resolve(Choice::Rock, Choice::Scissors),
            RoundOutcome::Decided {
                winner: Choice::Rock,
                loser: Choice::Scissors
            }
        );
    }

    #[test]
    fn lizard_beats_spock() {
        assert_eq!(
            resolve(Choice::Lizard, Choice::Spock),
            RoundOutcome::Decided {
                winner: Choice::Lizard,
                loser: Choice::Spock
            }
        );
    }

    #[test]
    fn equal_choices_draw() {
        assert_eq!(resolve(Choice::Paper, Choice::Paper), RoundOutcome::Draw);
    }

    #[test]
    fn order_of_arguments_does_not_change_the_winner() {
        assert_eq!(
            resolve(Choice::Scissors, Choice::Rock),
            RoundOutcome::Decided {
                winner: Choice::Rock,
                loser: Choice::Scissors
            }
        );
    }

    #[test]
    fn classic_mode_rejects_extended_signs() {
        assert!(is_valid_choice(GameMode::Classic, Choice::Rock));
        assert!(!is_valid_choice(GameMode::Classic, Choice::Lizard));
        assert!(!is_valid_choice(GameMode::Classic, Choice::Spock));
    }

    #[test]
    fn extended_mode_allows_all_five_signs() {
        for choice in EXTENDED_CHOICES {
            assert!(is_valid_choice(GameMode::Extended, choice));
        }
    }

    #[test]
    fn every_sign_beats_exactly_two_and_loses_to_two() {
        for &a in EXTENDED_CHOICES.iter() {
            let wins = EXTENDED_CHOICES
                .iter()
                .filter(|&&b| {
                    a != b
                        && resolve(a, b)
                            == RoundOutcome::Decided {
                                winner: a,
                                loser: b,
                            }
                })
                .count();
            assert_eq!(wins, 2, "{a:?} must beat exactly two signs");
        }
    }
}
