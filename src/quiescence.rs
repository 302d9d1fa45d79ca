//! Capture-only leaf evaluation.
//!
//! A fixed-depth search that stops right before a capture lands badly
//! misjudges the position (the horizon effect). Instead of scoring leaves
//! with the raw store difference, this module keeps playing, but only
//! moves whose last stone lands in an empty hole on the mover's own side,
//! i.e. the moves that capture right now. Once no such move exists the
//! store difference stands.
//!
//! Bound threading and turn handling match the main search: bounds negate
//! and swap when the turn changes, and a round is consumed only when the
//! turn changes. `rounds` caps the number of turn changes so a pathological
//! shuffle cannot recurse forever.

use crate::constants::HOLE_COUNT;
use crate::game::{Game, hole_index, store_index};
use crate::search::Deadline;

/// Score `game` from the mover's perspective within `[alpha, beta]`,
/// exploring only immediately-capturing continuations.
pub fn quiesce(game: &Game, mut alpha: i32, beta: i32, rounds: u32, deadline: &Deadline) -> i32 {
    let mut best = game.board[store_index(game.turn)] as i32
        - game.board[store_index(game.turn.opponent())] as i32;
    if best >= beta {
        return beta;
    }
    alpha = alpha.max(best);

    if rounds == 0 {
        return best;
    }

    for mv in 0..HOLE_COUNT {
        if deadline.expired() {
            break;
        }

        // Only sows whose last stone lands in a currently-empty hole short
        // of the mover's own store can capture; skip everything else.
        let pos = hole_index(game.turn, mv);
        let landing = pos + game.board[pos] as usize;
        if !game.can_move(mv)
            || landing >= store_index(game.turn)
            || game.board[landing] != 0
        {
            continue;
        }

        let mut next = game.clone();
        next.make_move(mv);

        let eval = if next.turn == game.turn {
            // Extra turns keep the current round
            quiesce(&next, alpha, beta, rounds, deadline)
        } else {
            -quiesce(&next, -beta, -alpha, rounds - 1, deadline)
        };

        if eval >= beta {
            return beta;
        }
        alpha = alpha.max(eval);
        best = best.max(eval);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn far_deadline() -> Deadline {
        Deadline::after(Duration::from_secs(60))
    }

    #[test]
    fn test_baseline_without_captures() {
        // The symmetric opening has no empty holes, so no move captures
        // and the score is the bare store difference.
        let game = Game::with_starter(4);
        assert_eq!(quiesce(&game, -49, 49, 16, &far_deadline()), 0);
    }

    #[test]
    fn test_sees_immediate_capture() {
        // Sowing hole 0 lands in empty hole 1 and captures the facing
        // seven-stone pile; the opponent has no counter-capture.
        let game = Game::with_stones(&[1, 0, 3, 3, 3, 3], &[2, 2, 2, 2, 7, 2]).unwrap();
        assert_eq!(quiesce(&game, -49, 49, 16, &far_deadline()), 8);
    }

    #[test]
    fn test_round_cap_stops_exploration() {
        let game = Game::with_stones(&[1, 0, 3, 3, 3, 3], &[2, 2, 2, 2, 7, 2]).unwrap();
        assert_eq!(quiesce(&game, -49, 49, 0, &far_deadline()), 0);
    }

    #[test]
    fn test_fail_hard_against_beta() {
        let game = Game::with_stones(&[1, 0, 3, 3, 3, 3], &[2, 2, 2, 2, 7, 2]).unwrap();
        assert_eq!(quiesce(&game, -49, 5, 16, &far_deadline()), 5);
        // Baseline already at or above beta
        let mut swept = Game::with_stones(&[0, 0, 0, 0, 0, 1], &[3; HOLE_COUNT]).unwrap();
        swept.make_move(5);
        assert_eq!(quiesce(&swept, -49, -20, 16, &far_deadline()), -20);
    }

    #[test]
    fn test_terminal_position_scores_store_difference() {
        let mut game = Game::with_stones(&[0, 0, 0, 0, 0, 1], &[3; HOLE_COUNT]).unwrap();
        game.make_move(5);
        // Swept: stores hold 1 vs 18, Player One to move
        assert_eq!(quiesce(&game, -49, 49, 16, &far_deadline()), -17);
    }
}
