//! Hash-keyed score cache for the alpha-beta search.
//!
//! Entries are keyed by Zobrist hash and carry the full position they were
//! computed for: a hit only counts after the stored board and turn compare
//! equal, so a 64-bit collision can never smuggle in a foreign score.
//!
//! Alpha-beta scores are only meaningful relative to the window they were
//! searched with, so every entry records whether its score is exact, a
//! lower bound (fail-high) or an upper bound (fail-low), and a probe
//! checks the bound against the caller's current window.

use std::collections::HashMap;

use crate::game::Game;
use crate::zobrist::Zobrist;

/// How an entry's score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Searched with the score inside the window.
    Exact,
    /// Failed high: the true value is at least this score.
    Lower,
    /// Failed low: the true value is at most this score.
    Upper,
}

/// A cached evaluation, including the position it belongs to.
struct CacheEntry {
    game: Game,
    depth: u32,
    bound: Bound,
    score: i32,
}

/// Position-score cache backed by a [`Zobrist`] hasher.
pub struct ScoreCache {
    hasher: Zobrist,
    table: HashMap<u64, CacheEntry>,
}

impl ScoreCache {
    pub fn new(hasher: Zobrist) -> Self {
        ScoreCache {
            hasher,
            table: HashMap::new(),
        }
    }

    /// Fingerprint of a position (also the cache key).
    pub fn hash(&self, game: &Game) -> u64 {
        self.hasher.hash(game)
    }

    /// Look up a usable score for `game` at the given remaining depth and
    /// window. Returns `None` on miss, on a hash collision, when the entry
    /// is shallower than `depth`, or when a bound cannot cut the window.
    pub fn probe(&self, game: &Game, depth: u32, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.table.get(&self.hasher.hash(game))?;
        if entry.depth < depth || entry.game != *game {
            return None;
        }
        match entry.bound {
            Bound::Exact => Some(entry.score),
            Bound::Lower if entry.score >= beta => Some(entry.score),
            Bound::Upper if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Record a score for `game`. A later store for the same hash replaces
    /// the earlier one.
    pub fn store(&mut self, game: &Game, depth: u32, bound: Bound, score: i32) {
        self.table.insert(
            self.hasher.hash(game),
            CacheEntry {
                game: game.clone(),
                depth,
                bound,
                score,
            },
        );
    }

    /// Insert an entry under an arbitrary key, bypassing the hasher.
    /// Lets tests fabricate the 64-bit collisions that cannot be forced
    /// through the public API.
    #[cfg(test)]
    fn plant(&mut self, key: u64, game: &Game, depth: u32, bound: Bound, score: i32) {
        self.table.insert(
            key,
            CacheEntry {
                game: game.clone(),
                depth,
                bound,
                score,
            },
        );
    }

    /// Number of cached positions.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_for(game: &Game) -> ScoreCache {
        ScoreCache::new(Zobrist::new(game, 42))
    }

    #[test]
    fn test_probe_roundtrip() {
        let game = Game::with_starter(4);
        let mut cache = cache_for(&game);
        assert!(cache.probe(&game, 3, -49, 49).is_none());

        cache.store(&game, 3, Bound::Exact, 5);
        assert_eq!(cache.probe(&game, 3, -49, 49), Some(5));
        // A deeper probe must not accept the shallower entry
        assert!(cache.probe(&game, 4, -49, 49).is_none());
        // A shallower probe may
        assert_eq!(cache.probe(&game, 1, -49, 49), Some(5));
    }

    #[test]
    fn test_bounds_respect_window() {
        let game = Game::with_starter(4);
        let mut cache = cache_for(&game);

        cache.store(&game, 2, Bound::Lower, 10);
        assert_eq!(cache.probe(&game, 2, -49, 10), Some(10)); // cuts beta
        assert!(cache.probe(&game, 2, -49, 49).is_none()); // inside window

        cache.store(&game, 2, Bound::Upper, -10);
        assert_eq!(cache.probe(&game, 2, -10, 49), Some(-10)); // below alpha
        assert!(cache.probe(&game, 2, -49, 49).is_none());
    }

    #[test]
    fn test_collision_rejected_by_state_check() {
        // Two distinct positions forced onto the same key: the entry under
        // gameB's hash holds gameA's state, as a genuine 64-bit collision
        // would. The probe must reject it rather than return gameA's score.
        let game_a = Game::with_starter(4);
        let mut game_b = game_a.clone();
        assert!(game_b.make_move(0));

        let mut cache = cache_for(&game_a);
        let key_b = cache.hash(&game_b);
        cache.plant(key_b, &game_a, 5, Bound::Exact, 37);

        assert!(cache.probe(&game_b, 1, -49, 49).is_none());
        // The same entry is served when the stored state actually matches
        cache.plant(key_b, &game_b, 5, Bound::Exact, 37);
        assert_eq!(cache.probe(&game_b, 1, -49, 49), Some(37));
    }

    #[test]
    fn test_different_positions_miss() {
        let mut game = Game::with_starter(4);
        let mut cache = cache_for(&game);
        cache.store(&game, 2, Bound::Exact, 5);

        game.make_move(0);
        assert!(cache.probe(&game, 2, -49, 49).is_none());
    }
}
