//! Engine module: the 4x4 board value and the pure functions that move,
//! spawn and evaluate it.
//!
//! - `Board` is an immutable-in/new-out value with convenience methods.
//! - Free functions mirror the methods and form the caller-facing contract:
//!   `create_initial_board`, `apply_move`, `spawn_tile`, `evaluate_status`.
//! - Every random draw goes through an injected `rand::Rng`, so a seeded RNG
//!   makes a whole game reproducible.

mod ops;
mod spawn;
pub mod state;
mod status;

pub use state::{is_tile_value, Axis, Board, Cell, Move, CELLS, MAX_TILE_VALUE, SIZE};

pub use ops::{apply_move, can_move, MoveResult};
pub use spawn::{create_initial_board, random_tile_value, spawn_tile};
pub use status::{evaluate_status, is_game_over, GameStatus, WINNING_TILE};
