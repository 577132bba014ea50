//! Property tests over the rule table.

use jokenpo_backend::domain::rules::{resolve, RoundOutcome, EXTENDED_CHOICES};
use jokenpo_backend::entities::plays::Choice;
use proptest::prelude::*;

fn any_choice() -> impl Strategy<Value = Choice> {
    prop::sample::select(EXTENDED_CHOICES.to_vec())
}

proptest! {
    /// `resolve(a, b)` and `resolve(b, a)` must agree: same winner, same
    /// loser, and a draw in one direction is a draw in the other.
    #[test]
    fn resolve_is_inverse_consistent(a in any_choice(), b in any_choice()) {
        match (resolve(a, b), resolve(b, a)) {
            (RoundOutcome::Draw, RoundOutcome::Draw) => prop_assert_eq!(a, b),
            (
                RoundOutcome::Decided { winner: w1, loser: l1 },
                RoundOutcome::Decided { winner: w2, loser: l2 },
            ) => {
                prop_assert_eq!(w1, w2);
                prop_assert_eq!(l1, l2);
            }
            _ => prop_assert!(false, "one direction drew while the other decided"),
        }
    }

    #[test]
    fn equal_choices_always_draw(a in any_choice()) {
        prop_assert_eq!(resolve(a, a), RoundOutcome::Draw);
    }

    /// A decided outcome only ever names the two supplied choices, and only
    /// for distinct pairs.
    #[test]
    fn decided_outcomes_name_the_supplied_choices(a in any_choice(), b in any_choice()) {
        if let RoundOutcome::Decided { winner, loser } = resolve(a, b) {
            prop_assert_ne!(a, b);
            prop_assert!(
                (winner == a && loser == b) || (winner == b && loser == a),
                "outcome named a choice nobody played"
            );
        }
    }
}

#[test]
fn the_table_is_a_perfect_tournament() {
    // Every distinct ordered pair decides in exactly one direction.
    for &a in EXTENDED_CHOICES.iter() {
        for &b in EXTENDED_CHOICES.iter() {
            if a == b {
                continue;
            }
            let a_wins = resolve(a, b) == RoundOutcome::Decided { winner: a, loser: b };
            let b_wins = resolve(a, b) == RoundOutcome::Decided { winner: b, loser: a };
            assert!(a_wins ^ b_wins, "{a:?} vs {b:?} must decide exactly one way");
        }
    }
}
