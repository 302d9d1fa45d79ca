//! Kalah game state and move execution.
//!
//! This module provides the core game logic, including:
//! - Board state as a 1D cyclic array (holes and stores for both players)
//! - Sowing, capture, extra turns, and the end-of-game sweep
//! - Index arithmetic between relative hole numbers and board positions
//!
//! The total number of stones on the board is invariant for the lifetime of
//! a [`Game`]: moves only redistribute stones between holes and stores.

use std::fmt;

use thiserror::Error;

use crate::constants::{BOARD_SIZE, HOLE_COUNT};

/// Both player bits; XOR-ing a player with this mask yields the opponent.
const PLAYER_XOR: u8 = 0b11;

/// One of the two players.
///
/// The discriminants are single bits of [`PLAYER_XOR`], so the opponent is
/// a single XOR away and `player as usize - 1` is the 0-based ordinal used
/// by the index arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Player {
    One = 0b01,
    Two = 0b10,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self as u8 ^ PLAYER_XOR {
            0b01 => Player::One,
            _ => Player::Two,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "p1"),
            Player::Two => write!(f, "p2"),
        }
    }
}

/// Error constructing a game from explicit per-hole stone counts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A side's layout does not have exactly [`HOLE_COUNT`] entries.
    #[error("{side} layout has {got} holes")]
    WrongLayout { side: Player, got: usize },
}

/// A Kalah position: whose turn it is and the stone count at every board
/// position.
///
/// `Clone` is a deep copy (the board is an inline array), which is what the
/// search relies on to explore hypothetical continuations without touching
/// the live game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// The player to move.
    pub turn: Player,
    /// Stone counts, laid out as p1 holes, p1 store, p2 holes, p2 store.
    pub board: [u32; BOARD_SIZE],
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// An empty board with Player One to move.
    pub fn new() -> Self {
        Game {
            turn: Player::One,
            board: [0; BOARD_SIZE],
        }
    }

    /// A game where every hole on both sides starts with `stones` stones.
    pub fn with_starter(stones: u32) -> Self {
        let mut game = Game::new();
        for hole in 0..HOLE_COUNT {
            game.board[hole_index(Player::One, hole)] = stones;
            game.board[hole_index(Player::Two, hole)] = stones;
        }
        game
    }

    /// A game with explicit per-hole stone counts for each side.
    /// Both stores start empty and Player One moves first.
    ///
    /// # Errors
    /// Returns [`GameError::WrongLayout`] if either slice does not have
    /// exactly [`HOLE_COUNT`] entries.
    pub fn with_stones(p1_stones: &[u32], p2_stones: &[u32]) -> Result<Self, GameError> {
        if p1_stones.len() != HOLE_COUNT {
            return Err(GameError::WrongLayout {
                side: Player::One,
                got: p1_stones.len(),
            });
        }
        if p2_stones.len() != HOLE_COUNT {
            return Err(GameError::WrongLayout {
                side: Player::Two,
                got: p2_stones.len(),
            });
        }

        let mut game = Game::new();
        for (hole, &stones) in p1_stones.iter().enumerate() {
            game.board[hole_index(Player::One, hole)] = stones;
        }
        for (hole, &stones) in p2_stones.iter().enumerate() {
            game.board[hole_index(Player::Two, hole)] = stones;
        }
        Ok(game)
    }

    /// Whether the mover may sow from the given relative hole.
    /// False for out-of-range hole numbers and for empty holes.
    pub fn can_move(&self, hole: usize) -> bool {
        hole < HOLE_COUNT && self.board[hole_index(self.turn, hole)] > 0
    }

    /// Sow from the mover's relative hole. Returns false (leaving the state
    /// untouched) when [`Game::can_move`] is false.
    ///
    /// Otherwise: every stone is picked up and sown one per consecutive
    /// board position, skipping the opponent's store. If the last stone
    /// lands in an empty hole on the mover's side and the mirrored opponent
    /// hole is non-empty, both piles are captured into the mover's store.
    /// If either side then has no stones left in its holes, each player
    /// sweeps their own remaining holes into their store and the game ends.
    /// Landing the last stone exactly in the mover's own store grants an
    /// extra turn; any other landing passes the turn to the opponent.
    pub fn make_move(&mut self, hole: usize) -> bool {
        if !self.can_move(hole) {
            return false;
        }

        let mut pos = hole_index(self.turn, hole);
        let mut stones = self.board[pos];
        let opp_store = store_index(self.turn.opponent());

        // Pick up the stones
        self.board[pos] = 0;

        // Place one stone in every consecutive hole (skipping the opponent's
        // store) until there are no stones remaining
        while stones > 0 {
            pos = (pos + 1) % BOARD_SIZE;
            if pos == opp_store {
                continue;
            }
            self.board[pos] += 1;
            stones -= 1;
        }

        // If the last stone was placed in an empty hole on the mover's side
        // and the mirrored opponent hole holds stones, capture both piles
        let (hole_num, hole_side) = hole_number(pos);
        if hole_num != HOLE_COUNT && hole_side == self.turn {
            let store = store_index(self.turn);
            let opp_hole = opp_hole_index(self.turn, hole_num);
            if self.board[pos] == 1 && self.board[opp_hole] > 0 {
                self.board[store] += self.board[pos] + self.board[opp_hole];
                self.board[pos] = 0;
                self.board[opp_hole] = 0;
            }
        }

        // If either player has run out of moves, both players sweep their
        // remaining holes into their own store and the game is over
        if self.game_over() {
            let p1_store = store_index(Player::One);
            let p2_store = store_index(Player::Two);
            for hole in 0..HOLE_COUNT {
                let p1_hole = hole_index(Player::One, hole);
                let p2_hole = hole_index(Player::Two, hole);
                self.board[p1_store] += self.board[p1_hole];
                self.board[p2_store] += self.board[p2_hole];
                self.board[p1_hole] = 0;
                self.board[p2_hole] = 0;
            }
        }

        // Landing in the mover's own store grants an extra turn
        if pos == store_index(self.turn) {
            return true;
        }

        self.turn = self.turn.opponent();
        true
    }

    /// True iff either player's holes are all empty (stores excluded).
    pub fn game_over(&self) -> bool {
        let moves_remaining = |player| {
            (0..HOLE_COUNT).any(|hole| self.board[hole_index(player, hole)] > 0)
        };
        !moves_remaining(Player::One) || !moves_remaining(Player::Two)
    }

    /// Total stones across every hole and store. Constant for the lifetime
    /// of the game; used to size the Zobrist table and the search window.
    pub fn total_stones(&self) -> u32 {
        self.board.iter().sum()
    }
}

// =============================================================================
// Index arithmetic
// =============================================================================

/// Absolute board index of a player's relative hole (`hole == HOLE_COUNT`
/// yields that player's store).
#[inline]
pub fn hole_index(player: Player, hole: usize) -> usize {
    (player as usize - 1) * (HOLE_COUNT + 1) + hole
}

/// Absolute board index of a player's store.
#[inline]
pub fn store_index(player: Player) -> usize {
    hole_index(player, HOLE_COUNT)
}

/// Absolute index of the opponent hole facing a player's relative hole.
#[inline]
pub fn opp_hole_index(player: Player, hole: usize) -> usize {
    hole_index(player.opponent(), HOLE_COUNT - 1 - hole)
}

/// Decompose an absolute board index into (relative hole number, side).
/// A store decomposes to `(HOLE_COUNT, owner)`.
#[inline]
fn hole_number(pos: usize) -> (usize, Player) {
    if pos <= HOLE_COUNT {
        (pos, Player::One)
    } else {
        (pos - (HOLE_COUNT + 1), Player::Two)
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl fmt::Display for Game {
    /// Render the board with Player Two's store on top, Player One's on the
    /// bottom, and the facing hole pairs between them.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[  {:2}  ]", self.board[store_index(Player::Two)])?;
        for hole in 0..HOLE_COUNT {
            let p1_hole = hole_index(Player::One, hole);
            let p2_hole = opp_hole_index(Player::One, hole);
            writeln!(f, "[{:2}][{:2}]", self.board[p1_hole], self.board[p2_hole])?;
        }
        writeln!(f, "[  {:2}  ]", self.board[store_index(Player::One)])
    }
}
