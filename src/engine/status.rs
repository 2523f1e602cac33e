use serde::{Deserialize, Serialize};

use super::ops::can_move;
use super::state::{Board, Move};

/// Tile value that wins the game.
pub const WINNING_TILE: u32 = 2048;

/// Snapshot of a board's game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// Some tile reached `WINNING_TILE`.
    pub won: bool,
    /// The board is full and no direction changes it.
    pub over: bool,
    /// Sum of all tile values on the board.
    pub score: u64,
}

pub fn evaluate_status(board: &Board) -> GameStatus {
    GameStatus {
        won: board.highest_tile() >= WINNING_TILE,
        over: is_game_over(board),
        score: board.sum(),
    }
}

/// A full board can still have merges available, so every direction is tried.
pub fn is_game_over(board: &Board) -> bool {
    board.is_full() && !Move::ALL.iter().any(|&dir| can_move(board, dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn won_when_2048_present() {
        let b = Board::from_values([[0, 0, 0, 0], [0, 2048, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0]]).unwrap();
        let status = evaluate_status(&b);
        assert!(status.won);
        assert!(!status.over);
        assert_eq!(status.score, 2050);
    }

    #[test]
    fn not_won_below_2048() {
        let b = Board::from_values([[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
        assert!(!evaluate_status(&b).won);
    }

    #[test]
    fn full_board_without_merges_is_over() {
        let b = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
        let status = evaluate_status(&b);
        assert!(status.over);
        assert!(!status.won);
        assert_eq!(status.score, 48);
    }

    #[test]
    fn full_board_with_a_merge_left_is_not_over() {
        // Only the bottom-right pair can combine (vertically).
        let b = Board::from_values([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 8], [4, 2, 4, 8]]).unwrap();
        assert!(b.is_full());
        assert!(!is_game_over(&b));
        assert!(can_move(&b, Move::Up));
        assert!(!can_move(&b, Move::Left));
    }

    #[test]
    fn board_with_space_is_not_over() {
        assert!(!is_game_over(&Board::empty()));
        assert_eq!(evaluate_status(&Board::empty()), GameStatus { won: false, over: false, score: 0 });
    }

    #[test]
    fn won_once_past_2048() {
        let b = Board::from_values([[4096, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2]]).unwrap();
        assert!(b.cells().iter().all(|c| c.value != WINNING_TILE));
        assert!(evaluate_status(&b).won);
    }
}
