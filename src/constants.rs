//! Constants for board geometry and search parameters.
//!
//! The board is a 1D array laid out cyclically: Player One's six holes,
//! Player One's store, Player Two's six holes, Player Two's store.
//! Relative hole numbers (what a player chooses) are always `0..HOLE_COUNT`;
//! the index arithmetic in [`crate::game`] maps them onto this array.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of sowing holes on each player's side.
pub const HOLE_COUNT: usize = 6;

/// Total board array size: both players' holes plus both stores.
pub const BOARD_SIZE: usize = HOLE_COUNT * 2 + 2;

/// Stones per hole in the standard Kalah starting position.
pub const DEFAULT_STARTER: u32 = 4;

// =============================================================================
// Search Parameters
// =============================================================================

/// Default wall-clock budget for one engine move, in milliseconds.
/// Only a CLI default; the library always takes an explicit `Duration`.
pub const DEFAULT_THINK_MS: u64 = 5000;

/// Maximum turn changes the quiescence scorer may explore below a leaf.
/// Capture chains shrink the hole population quickly, so this is a safety
/// cap rather than a tuning knob.
pub const QUIESCENCE_ROUNDS: u32 = 16;
