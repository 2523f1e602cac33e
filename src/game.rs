//! A single game instance: owns its board and random source and runs the
//! move → spawn → status cycle for each input.

use log::debug;
use rand::Rng;

use crate::engine::{apply_move, create_initial_board, evaluate_status, spawn_tile, Board, GameStatus, Move};

/// What a call to [`Game::play`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The game is already won or over; input is ignored until `new_game`.
    Ignored,
    /// The move changed nothing, so no tile spawned and no turn was consumed.
    Unchanged,
    /// The board moved, a tile spawned and the status was re-evaluated.
    Moved(GameStatus),
}

/// One game. The board is replaced wholesale on every turn, never shared.
#[derive(Debug, Clone)]
pub struct Game<R> {
    board: Board,
    rng: R,
    status: GameStatus,
    score: u64,
    turns: u32,
}

impl<R: Rng> Game<R> {
    /// Start a game on a fresh board with two starting tiles.
    pub fn new(mut rng: R) -> Self {
        let board = create_initial_board(&mut rng);
        Self::from_board(board, rng)
    }

    /// Resume from an existing board. The merge score starts at zero.
    pub fn from_board(board: Board, rng: R) -> Self {
        let status = evaluate_status(&board);
        Game { board, rng, status, score: 0, turns: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status as of the last completed turn.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Cumulative value of every merge made this game (classic 2048 scoring).
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Number of moves that changed the board.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_finished(&self) -> bool {
        self.status.won || self.status.over
    }

    /// Apply one input. A spawn and status re-evaluation happen only if the
    /// move changed the board.
    pub fn play(&mut self, direction: Move) -> Turn {
        if self.is_finished() {
            debug!("ignoring {direction}: game already finished ({:?})", self.status);
            return Turn::Ignored;
        }
        let result = apply_move(&self.board, direction);
        if !result.changed {
            debug!("{direction} changed nothing");
            return Turn::Unchanged;
        }
        self.board = spawn_tile(&result.board, &mut self.rng);
        self.score += result.merged_score;
        self.turns += 1;
        self.status = evaluate_status(&self.board);
        debug!(
            "turn {}: {direction} in {} steps, +{} (score {}, won {}, over {})",
            self.turns, result.steps, result.merged_score, self.score, self.status.won, self.status.over
        );
        Turn::Moved(self.status)
    }

    /// Discard the board and start over with the same random source.
    pub fn new_game(&mut self) {
        self.board = create_initial_board(&mut self.rng);
        self.status = evaluate_status(&self.board);
        self.score = 0;
        self.turns = 0;
        debug!("new game");
    }
}
