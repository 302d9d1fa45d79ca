//! Kalah-Rust: a Kalah (Mancala) engine with time-bounded search.
//!
//! This crate provides the two-player Kalah board game together with an
//! AI opponent based on iterative-deepening alpha-beta search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search parameters
//! - [`game`] - Core game logic (board state, sowing, captures, sweep)
//! - [`search`] - Iterative-deepening alpha-beta with a time budget
//! - [`quiescence`] - Capture-only leaf evaluation
//! - [`zobrist`] - 64-bit position fingerprints
//! - [`cache`] - Hash-keyed score cache used by the search
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//!
//! use kalah_rust::game::Game;
//! use kalah_rust::search::Searcher;
//!
//! // Start a standard game and ask the engine for a move
//! let mut game = Game::with_starter(4);
//! let mut searcher = Searcher::new(&game, 1);
//!
//! if let Some(result) = searcher.best_move(&game, Duration::from_millis(20)) {
//!     assert!(game.can_move(result.mv));
//!     game.make_move(result.mv);
//! }
//! ```

pub mod cache;
pub mod constants;
pub mod game;
pub mod quiescence;
pub mod search;
pub mod zobrist;
