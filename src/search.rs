//! Iterative-deepening alpha-beta search.
//!
//! The engine runs a negamax-style alpha-beta over cloned [`Game`] states
//! at depths 1, 2, 3, … until the wall-clock budget runs out. Only the
//! last fully completed depth counts: a depth interrupted by the deadline
//! is discarded wholesale, never mixed with an earlier result.
//!
//! Depth is measured in turn changes, not recursive calls. A move that
//! earns an extra turn recurses at the parent's depth with the bounds kept
//! as-is; only when the turn flips do the bounds negate and swap and the
//! depth decrement. Leaves are scored by [`crate::quiescence`] rather than
//! a static heuristic, and interior results are cached by Zobrist hash
//! (see [`crate::cache`]).
//!
//! Cancellation is cooperative: the shared deadline is polled on entry to
//! every recursive call and before every child expansion, so the search
//! overshoots its budget by at most one leaf evaluation.

use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::cache::{Bound, ScoreCache};
use crate::constants::{HOLE_COUNT, QUIESCENCE_ROUNDS};
use crate::game::Game;
use crate::quiescence::quiesce;
use crate::zobrist::Zobrist;

/// Wall-clock cutoff shared by one whole search call.
pub struct Deadline(Instant);

impl Deadline {
    /// A deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Deadline(Instant::now() + budget)
    }

    /// Whether the budget has run out.
    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.0
    }
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move for the side to move (first entry of `line`).
    pub mv: usize,
    /// Principal variation: the predicted move sequence, extra turns
    /// included.
    pub line: Vec<usize>,
    /// Evaluation of `line` from the mover's perspective, in stones.
    pub score: i32,
    /// Last fully completed iterative-deepening depth.
    pub depth: u32,
    /// Positions visited across all completed and attempted depths.
    pub nodes: u64,
}

/// The search engine. Owns the Zobrist hasher and the score cache, both
/// sized for one particular game's stone total.
pub struct Searcher {
    cache: ScoreCache,
    nodes: u64,
}

impl Searcher {
    /// Build a searcher for `game`, with all hashing randomness drawn from
    /// `seed`.
    ///
    /// The hasher and cache are sized for `game`'s stone total, so the
    /// searcher is only valid for that game and positions reachable from
    /// it; handing it a game with more stones is out of range.
    pub fn new(game: &Game, seed: u64) -> Self {
        Searcher {
            cache: ScoreCache::new(Zobrist::new(game, seed)),
            nodes: 0,
        }
    }

    /// Zobrist fingerprint of a position, for logging and display.
    pub fn hash(&self, game: &Game) -> u64 {
        self.cache.hash(game)
    }

    /// Search for the mover's best move within `budget`.
    ///
    /// Returns `None` when the position is terminal or when the budget
    /// expires before even depth 1 completes; it never returns a move
    /// from a partially searched depth.
    pub fn best_move(&mut self, game: &Game, budget: Duration) -> Option<SearchResult> {
        let deadline = Deadline::after(budget);
        let window = game.total_stones() as i32 + 1;
        self.nodes = 0;

        let mut best: Option<SearchResult> = None;
        let mut depth = 1;
        loop {
            let mut line = Vec::new();
            let score = self.alpha_beta(game, depth, 0, -window, window, &mut line, &deadline);
            if deadline.expired() {
                break;
            }
            let Some(&mv) = line.first() else {
                // Terminal position: nothing to recommend
                break;
            };
            debug!(
                "depth {depth} complete: move {mv}, eval {score}, {} nodes, {} cached",
                self.nodes,
                self.cache.len()
            );
            best = Some(SearchResult {
                mv,
                line,
                score,
                depth,
                nodes: self.nodes,
            });
            depth += 1;
        }
        best
    }

    /// Recursive alpha-beta. `ply` is the distance from the root in moves
    /// (not turn changes); `depth` only decrements when the turn flips.
    ///
    /// On deadline expiry this bails out with `alpha`; the driver discards
    /// the whole depth, so the value is never used.
    #[allow(clippy::too_many_arguments)]
    fn alpha_beta(
        &mut self,
        game: &Game,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
        line: &mut Vec<usize>,
        deadline: &Deadline,
    ) -> i32 {
        self.nodes += 1;
        if deadline.expired() {
            return alpha;
        }

        if depth == 0 || game.game_over() {
            return quiesce(game, alpha, beta, QUIESCENCE_ROUNDS, deadline);
        }

        // The root must produce a move, not a bare score, so it never
        // takes the cache shortcut.
        if ply > 0 {
            if let Some(score) = self.cache.probe(game, depth, alpha, beta) {
                trace!("cache hit at ply {ply}: {score}");
                return score;
            }
        }

        let orig_alpha = alpha;
        let mut best_eval = i32::MIN;

        for mv in 0..HOLE_COUNT {
            if deadline.expired() {
                return alpha;
            }
            if !game.can_move(mv) {
                continue;
            }

            let mut next = game.clone();
            next.make_move(mv);

            let mut child_line = Vec::new();
            let eval = if next.turn == game.turn {
                // Extra turn: same mover, same depth, same window
                self.alpha_beta(&next, depth, ply + 1, alpha, beta, &mut child_line, deadline)
            } else {
                -self.alpha_beta(
                    &next,
                    depth - 1,
                    ply + 1,
                    -beta,
                    -alpha,
                    &mut child_line,
                    deadline,
                )
            };

            if eval >= beta {
                if !deadline.expired() {
                    self.cache.store(game, depth, Bound::Lower, beta);
                }
                return beta;
            }
            alpha = alpha.max(eval);

            if eval > best_eval {
                best_eval = eval;
                line.clear();
                line.push(mv);
                line.append(&mut child_line);
            }
        }

        if !deadline.expired() {
            let bound = if best_eval <= orig_alpha {
                Bound::Upper
            } else {
                Bound::Exact
            };
            self.cache.store(game, depth, bound, best_eval);
        }
        best_eval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Player;

    fn far_deadline() -> Deadline {
        Deadline::after(Duration::from_secs(60))
    }

    fn fixed_depth(game: &Game, depth: u32) -> (i32, Vec<usize>) {
        let mut searcher = Searcher::new(game, 42);
        let window = game.total_stones() as i32 + 1;
        let mut line = Vec::new();
        let score = searcher.alpha_beta(
            game,
            depth,
            0,
            -window,
            window,
            &mut line,
            &far_deadline(),
        );
        (score, line)
    }

    #[test]
    fn test_depth_one_takes_the_capture() {
        // Move 0 captures eight stones; nothing else comes close.
        let game = Game::with_stones(&[1, 0, 3, 3, 3, 3], &[2, 2, 2, 2, 7, 2]).unwrap();
        let (score, line) = fixed_depth(&game, 1);
        assert_eq!(line.first(), Some(&0));
        assert_eq!(score, 8);
    }

    #[test]
    fn test_extra_turn_stays_within_one_ply() {
        // Depth 1 from the symmetric start: the principal variation may
        // chain same-player extra turns, but it crosses exactly one turn
        // change, so every move before the last belongs to Player One.
        let game = Game::with_starter(4);
        let (_, line) = fixed_depth(&game, 1);
        assert!(!line.is_empty());
        let mut replay = game.clone();
        for (i, &mv) in line.iter().enumerate() {
            if i + 1 < line.len() {
                assert_eq!(replay.turn, Player::One);
            }
            assert!(replay.make_move(mv));
        }
    }

    #[test]
    fn test_forced_move_is_found() {
        let game = Game::with_stones(&[0, 0, 0, 0, 0, 1], &[3; HOLE_COUNT]).unwrap();
        let mut searcher = Searcher::new(&game, 42);
        let result = searcher
            .best_move(&game, Duration::from_millis(50))
            .expect("a legal move exists");
        assert_eq!(result.mv, 5);
        assert!(result.depth >= 1);
    }

    #[test]
    fn test_expired_budget_yields_none() {
        let game = Game::with_starter(4);
        let mut searcher = Searcher::new(&game, 42);
        assert!(searcher.best_move(&game, Duration::ZERO).is_none());
    }

    #[test]
    fn test_terminal_position_yields_none() {
        let mut game = Game::with_stones(&[0, 0, 0, 0, 0, 1], &[3; HOLE_COUNT]).unwrap();
        game.make_move(5);
        assert!(game.game_over());
        let mut searcher = Searcher::new(&game, 42);
        assert!(
            searcher
                .best_move(&game, Duration::from_millis(50))
                .is_none()
        );
    }

    #[test]
    fn test_recommended_move_is_legal() {
        let game = Game::with_starter(4);
        let mut searcher = Searcher::new(&game, 42);
        let result = searcher
            .best_move(&game, Duration::from_millis(50))
            .expect("opening position has moves");
        assert!(game.can_move(result.mv));
        assert!(result.nodes > 0);
    }
}
