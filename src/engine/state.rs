use rand::Rng;
use std::fmt;
use std::str::FromStr;

use super::{ops, spawn, status};
use crate::error::BoardError;
use serde::{Deserialize, Serialize};

/// Side length of the square grid.
pub const SIZE: usize = 4;
/// Number of cells on a board.
pub const CELLS: usize = SIZE * SIZE;
/// Largest tile value a board may hold. Two tiles at this value do not merge.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Which coordinate a move slides tiles along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Tiles slide within their row (Left/Right).
    Row,
    /// Tiles slide within their column (Up/Down).
    Column,
}

impl Move {
    /// All four directions in wire order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Move::Left | Move::Right => Axis::Row,
            Move::Up | Move::Down => Axis::Column,
        }
    }

    /// True when tiles travel towards the highest index on their axis (Right, Down).
    #[inline]
    pub fn towards_end(self) -> bool {
        matches!(self, Move::Right | Move::Down)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

impl FromStr for Move {
    type Err = BoardError;

    /// Accepts `up/down/left/right` or `u/d/l/r`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" | "up" => Ok(Move::Up),
            "d" | "down" => Ok(Move::Down),
            "l" | "left" => Ok(Move::Left),
            "r" | "right" => Ok(Move::Right),
            _ => Err(BoardError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Move {
    type Error = BoardError;

    fn try_from(b: u8) -> Result<Self, Self::Error> {
        match b {
            0 => Ok(Move::Up),
            1 => Ok(Move::Down),
            2 => Ok(Move::Left),
            3 => Ok(Move::Right),
            other => Err(BoardError::InvalidDirection(other.to_string())),
        }
    }
}

impl From<Move> for u8 {
    fn from(m: Move) -> Self {
        match m {
            Move::Up => 0,
            Move::Down => 1,
            Move::Left => 2,
            Move::Right => 3,
        }
    }
}

/// One grid position holding a tile value (0 = empty).
///
/// `id` is assigned once when the board is created (`row * 4 + column`) and
/// travels with the tile as its `row`/`column` change, so a presentation layer
/// can follow a tile across moves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: u8,
    pub value: u32,
    pub row: u8,
    pub column: u8,
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Row-major index of the cell's current coordinates.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.row as usize * SIZE + self.column as usize
    }
}

/// True for 0 and for powers of two in `2..=MAX_TILE_VALUE`.
#[inline]
pub fn is_tile_value(value: u32) -> bool {
    value == 0 || ((2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two())
}

/// The full 4x4 arrangement of cells.
///
/// Cells are kept indexed by their coordinates, so every constructor goes
/// through validation and lookups never depend on the order a caller supplied.
/// On the wire a board is its flat list of cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: [Cell; CELLS],
}

impl Board {
    /// A board with every value 0 and `id = row * 4 + column`.
    pub fn empty() -> Self {
        Board {
            cells: std::array::from_fn(|pos| Cell {
                id: pos as u8,
                value: 0,
                row: (pos / SIZE) as u8,
                column: (pos % SIZE) as u8,
            }),
        }
    }

    /// Build a board from its flat form. Cells may come in any order; they are
    /// placed by their `(row, column)`.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Result<Self, BoardError> {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.len() != CELLS {
            return Err(BoardError::WrongCellCount(cells.len()));
        }
        let mut slots: [Option<Cell>; CELLS] = [None; CELLS];
        let mut seen_ids = [false; CELLS];
        for cell in cells {
            if cell.row as usize >= SIZE || cell.column as usize >= SIZE {
                return Err(BoardError::OutOfBounds { id: cell.id, row: cell.row, column: cell.column });
            }
            if !is_tile_value(cell.value) {
                return Err(BoardError::InvalidValue { value: cell.value, row: cell.row, column: cell.column });
            }
            let id = cell.id as usize;
            if id >= CELLS || seen_ids[id] {
                return Err(BoardError::DuplicateId(cell.id));
            }
            seen_ids[id] = true;
            let slot = &mut slots[cell.position()];
            if slot.is_some() {
                return Err(BoardError::DuplicatePosition { row: cell.row, column: cell.column });
            }
            *slot = Some(cell);
        }
        // 16 distinct in-bounds positions cover the grid, so every slot is filled.
        let mut board = Board::empty();
        for (pos, slot) in slots.into_iter().enumerate() {
            if let Some(cell) = slot {
                board.cells[pos] = cell;
            }
        }
        Ok(board)
    }

    /// Build a board from its grid form. The coordinates stored in each cell
    /// are authoritative, not where the cell sits in `grid`.
    pub fn from_grid(grid: [[Cell; SIZE]; SIZE]) -> Result<Self, BoardError> {
        Self::from_cells(grid.into_iter().flatten())
    }

    /// Build a fresh board (ids assigned by position) from row-major values.
    pub fn from_values(values: [[u32; SIZE]; SIZE]) -> Result<Self, BoardError> {
        let mut board = Board::empty();
        for (r, row) in values.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if !is_tile_value(value) {
                    return Err(BoardError::InvalidValue { value, row: r as u8, column: c as u8 });
                }
                board.cells[r * SIZE + c].value = value;
            }
        }
        Ok(board)
    }

    /// Flat form, ordered by `(row, column)` ascending.
    pub fn to_flat(&self) -> Vec<Cell> {
        self.cells.to_vec()
    }

    /// Grid form: four rows of four cells.
    pub fn to_grid(&self) -> [[Cell; SIZE]; SIZE] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.cells[r * SIZE + c]))
    }

    /// Row-major tile values.
    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        std::array::from_fn(|r| std::array::from_fn(|c| self.cells[r * SIZE + c].value))
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell; CELLS] {
        &self.cells
    }

    /// The cell at `(row, column)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell> {
        if row < SIZE && column < SIZE {
            Some(self.cells[row * SIZE + column])
        } else {
            None
        }
    }

    /// The cell currently carrying identity `id`.
    pub fn cell_by_id(&self, id: u8) -> Option<Cell> {
        self.cells.iter().find(|c| c.id == id).copied()
    }

    /// Count the number of empty cells on the board.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count_empty() == 0
    }

    /// Return the highest tile value (e.g., 2048) present on the board.
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().map(|c| c.value).max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|c| u64::from(c.value)).sum()
    }

    /// Slide/merge tiles in `dir` (no random insert).
    ///
    /// ```
    /// use game_2048::engine::{Board, Move};
    /// let b = Board::from_values([[2, 0, 2, 0], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// let moved = b.apply_move(Move::Right);
    /// assert!(moved.changed);
    /// assert_eq!(moved.board.values()[0], [0, 0, 0, 4]);
    /// ```
    #[inline]
    pub fn apply_move(&self, dir: Move) -> ops::MoveResult {
        ops::apply_move(self, dir)
    }

    /// Insert a random 2 (90%) or 4 (10%) tile into a random empty cell, using the provided RNG.
    /// A full board is returned unchanged.
    #[inline]
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        spawn::spawn_tile(self, rng)
    }

    /// Won/over flags and board-sum score.
    #[inline]
    pub fn status(&self) -> status::GameStatus {
        status::evaluate_status(self)
    }

    /// Return true if the board is full and no direction changes it.
    #[inline]
    pub fn is_game_over(&self) -> bool {
        status::is_game_over(self)
    }

    #[inline]
    pub(crate) fn at(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Store `cell` at its own coordinates.
    #[inline]
    pub(crate) fn place(&mut self, cell: Cell) {
        self.cells[cell.position()] = cell;
    }

    pub(crate) fn empty_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().filter(|c| c.is_empty()).map(Cell::position)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = BoardError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Board::from_cells(cells)
    }
}

impl From<Board> for Vec<Cell> {
    fn from(b: Board) -> Self {
        b.to_flat()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.values())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for (r, row) in self.values().iter().enumerate() {
            if r > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let rendered: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", rendered.join("|"))?;
        }
        Ok(())
    }
}

fn format_val(val: u32) -> String {
    match val {
        0 => String::from("       "),
        x => format!("{:^7}", x),
    }
}
