//! Invariant violations raised when a caller hands the engine a malformed board
//! or an unknown direction.

/// Errors for caller-supplied input that would otherwise corrupt a board.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have exactly 16 cells, got {0}")]
    WrongCellCount(usize),
    #[error("cell {id} is outside the 4x4 grid at ({row}, {column})")]
    OutOfBounds { id: u8, row: u8, column: u8 },
    #[error("more than one cell occupies ({row}, {column})")]
    DuplicatePosition { row: u8, column: u8 },
    #[error("cell id {0} is used more than once or is not in 0..16")]
    DuplicateId(u8),
    #[error("value {value} at ({row}, {column}) is neither 0 nor a power of two >= 2")]
    InvalidValue { value: u32, row: u8, column: u8 },
    #[error("unknown direction {0:?}")]
    InvalidDirection(String),
}
