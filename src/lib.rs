//! game-2048: the move-resolution engine of a 2048-style sliding-tile puzzle
//!
//! This crate provides:
//! - A `Board` value of 16 identity-carrying cells, convertible between flat and grid forms
//! - The pure transition functions (`engine::apply_move`, `engine::spawn_tile`, ...)
//! - A `Game` instance that runs the move → spawn → status cycle and gates finished games
//! - Simple move-selection policies (`policy` module) used by the binaries and benches
//!
//! Quick start:
//! ```
//! use game_2048::engine::{self, Move};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let board = engine::create_initial_board(&mut rng);
//! assert_eq!(board.count_empty(), 14);
//!
//! // Only a move that changed something earns a spawn and a status check
//! let result = engine::apply_move(&board, Move::Left);
//! if result.changed {
//!     let next = engine::spawn_tile(&result.board, &mut rng);
//!     let status = engine::evaluate_status(&next);
//!     assert!(!status.won && !status.over);
//! }
//! ```
//!
//! Full loop with a policy:
//! ```
//! use game_2048::game::Game;
//! use game_2048::policy::{play_out, CornerPolicy};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(StdRng::seed_from_u64(123));
//! let summary = play_out(&mut game, &mut CornerPolicy, Some(5), |_, _| {});
//! assert_eq!(summary.turns, 5);
//! ```
//!
pub mod engine;
pub mod error;
pub mod game;
pub mod policy;

pub use engine::{Board, Cell, GameStatus, Move, MoveResult};
pub use error::BoardError;
pub use game::{Game, Turn};
