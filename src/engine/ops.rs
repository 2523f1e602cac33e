use log::trace;

use super::state::{Axis, Board, Cell, Move, MAX_TILE_VALUE, SIZE};

/// Result of one atomic step on a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    /// A tile moved one cell closer to the edge.
    Swap,
    /// Two equal tiles combined; `value` is the doubled value.
    Merge { value: u32 },
    /// Nothing left to do in this direction.
    Settled,
}

/// A board after a full settle-to-completion slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub board: Board,
    /// True iff at least one swap or merge happened.
    pub changed: bool,
    /// Number of atomic swap/merge steps performed.
    pub steps: u32,
    /// Sum of the values created by merges.
    pub merged_score: u64,
}

/// One row or column in flight, ordered from the far edge (index 0) to the
/// edge tiles travel towards (index `SIZE - 1`). `merged` tags tiles produced
/// by a merge during the current move; they take no part in another merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line {
    cells: [Cell; SIZE],
    merged: [bool; SIZE],
}

/// Row-major positions of line `index` for `dir`, far edge first.
pub(crate) fn line_positions(dir: Move, index: usize) -> [usize; SIZE] {
    std::array::from_fn(|k| {
        let along = if dir.towards_end() { k } else { SIZE - 1 - k };
        match dir.axis() {
            Axis::Row => index * SIZE + along,
            Axis::Column => along * SIZE + index,
        }
    })
}

impl Line {
    pub(crate) fn load(board: &Board, dir: Move, index: usize) -> Self {
        let positions = line_positions(dir, index);
        Line {
            cells: positions.map(|pos| board.at(pos)),
            merged: [false; SIZE],
        }
    }

    pub(crate) fn store(&self, board: &mut Board) {
        for cell in self.cells {
            board.place(cell);
        }
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> [u32; SIZE] {
        self.cells.map(|c| c.value)
    }

    /// Perform the single actionable step closest to the target edge.
    pub(crate) fn step(mut self) -> (Line, StepOutcome) {
        if self.cells.iter().all(Cell::is_empty) {
            return (self, StepOutcome::Settled);
        }
        for i in (0..SIZE - 1).rev() {
            let (far, near) = (self.cells[i], self.cells[i + 1]);
            if far.is_empty() {
                continue;
            }
            if near.is_empty() {
                self.swap(i);
                return (self, StepOutcome::Swap);
            }
            // tiles at the ceiling are treated as blocked so the result stays a valid board
            if far.value == near.value
                && far.value < MAX_TILE_VALUE
                && !self.merged[i]
                && !self.merged[i + 1]
            {
                let value = self.merge(i);
                return (self, StepOutcome::Merge { value });
            }
        }
        (self, StepOutcome::Settled)
    }

    /// Exchange coordinates of slots `i` and `i + 1`, keeping each cell's identity.
    fn swap(&mut self, i: usize) {
        let (mut far, mut near) = (self.cells[i], self.cells[i + 1]);
        std::mem::swap(&mut far.row, &mut near.row);
        std::mem::swap(&mut far.column, &mut near.column);
        self.cells[i] = near;
        self.cells[i + 1] = far;
        self.merged.swap(i, i + 1);
    }

    /// The far cell takes the near cell's place with double the value; the
    /// near cell goes back empty. Returns the new value.
    fn merge(&mut self, i: usize) -> u32 {
        self.swap(i);
        self.cells[i + 1].value *= 2;
        self.cells[i].value = 0;
        self.merged[i + 1] = true;
        self.merged[i] = false;
        self.cells[i + 1].value
    }
}

/// Slide/merge every line of `board` in `direction` until no line can step.
pub fn apply_move(board: &Board, direction: Move) -> MoveResult {
    let mut lines: [Line; SIZE] = std::array::from_fn(|i| Line::load(board, direction, i));
    let mut steps = 0u32;
    let mut merged_score = 0u64;
    let mut passes = 0u32;
    loop {
        let mut progressed = false;
        for line in lines.iter_mut() {
            let (next, outcome) = line.step();
            *line = next;
            match outcome {
                StepOutcome::Swap => {
                    steps += 1;
                    progressed = true;
                }
                StepOutcome::Merge { value } => {
                    steps += 1;
                    merged_score += u64::from(value);
                    progressed = true;
                }
                StepOutcome::Settled => {}
            }
        }
        passes += 1;
        if !progressed {
            break;
        }
    }
    trace!("move {direction}: {steps} steps over {passes} passes, +{merged_score}");

    let mut out = *board;
    for line in &lines {
        line.store(&mut out);
    }
    MoveResult { board: out, changed: steps > 0, steps, merged_score }
}

/// True if moving in `direction` would change the board.
pub fn can_move(board: &Board, direction: Move) -> bool {
    apply_move(board, direction).changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [u32; 4]) -> Board {
        Board::from_values([values, [0; 4], [0; 4], [0; 4]]).unwrap()
    }

    fn col(values: [u32; 4]) -> Board {
        Board::from_values(std::array::from_fn(|r| [values[r], 0, 0, 0])).unwrap()
    }

    fn first_row_after(values: [u32; 4], dir: Move) -> ([u32; 4], bool) {
        let res = apply_move(&row(values), dir);
        (res.board.values()[0], res.changed)
    }

    #[test]
    fn line_positions_run_far_edge_first() {
        assert_eq!(line_positions(Move::Right, 1), [4, 5, 6, 7]);
        assert_eq!(line_positions(Move::Left, 1), [7, 6, 5, 4]);
        assert_eq!(line_positions(Move::Down, 2), [2, 6, 10, 14]);
        assert_eq!(line_positions(Move::Up, 2), [14, 10, 6, 2]);
    }

    #[test]
    fn step_reports_one_atomic_action() {
        let line = Line::load(&row([2, 0, 2, 0]), Move::Right, 0);
        let (line, outcome) = line.step();
        assert_eq!(outcome, StepOutcome::Swap);
        assert_eq!(line.values(), [2, 0, 0, 2]);

        let line = Line::load(&row([0, 0, 2, 2]), Move::Right, 0);
        let (line, outcome) = line.step();
        assert_eq!(outcome, StepOutcome::Merge { value: 4 });
        assert_eq!(line.values(), [0, 0, 0, 4]);

        let line = Line::load(&row([2, 4, 8, 16]), Move::Right, 0);
        assert_eq!(line.step().1, StepOutcome::Settled);
    }

    #[test]
    fn step_settles_degenerate_lines_in_one_call() {
        for values in [[0, 0, 0, 0], [2, 4, 2, 4], [0, 0, 0, 8]] {
            let line = Line::load(&row(values), Move::Right, 0);
            let (after, outcome) = line.step();
            assert_eq!(outcome, StepOutcome::Settled);
            assert_eq!(after, line);
        }
    }

    #[test]
    fn test_move_right_gap() {
        assert_eq!(first_row_after([2, 0, 2, 0], Move::Right), ([0, 0, 0, 4], true));
    }

    #[test]
    fn test_move_left_four_equal() {
        assert_eq!(first_row_after([2, 2, 2, 2], Move::Left), ([4, 4, 0, 0], true));
        assert_eq!(first_row_after([2, 2, 2, 2], Move::Right), ([0, 0, 4, 4], true));
    }

    #[test]
    fn test_no_double_merge() {
        assert_eq!(first_row_after([4, 0, 2, 2], Move::Right), ([0, 0, 4, 4], true));
        assert_eq!(first_row_after([2, 2, 4, 0], Move::Right), ([0, 0, 4, 4], true));
        assert_eq!(first_row_after([2, 2, 2, 0], Move::Right), ([0, 0, 2, 4], true));
        assert_eq!(first_row_after([4, 4, 8, 0], Move::Left), ([8, 8, 0, 0], true));
        assert_eq!(first_row_after([8, 4, 4, 0], Move::Left), ([8, 8, 0, 0], true));
    }

    #[test]
    fn test_empty_line_any_direction() {
        for dir in Move::ALL {
            let res = apply_move(&Board::empty(), dir);
            assert!(!res.changed);
            assert_eq!(res.steps, 0);
            assert_eq!(res.board, Board::empty());
        }
    }

    #[test]
    fn test_blocked_line_is_unchanged() {
        assert_eq!(first_row_after([2, 4, 8, 16], Move::Left), ([2, 4, 8, 16], false));
        assert_eq!(first_row_after([2, 4, 8, 16], Move::Right), ([2, 4, 8, 16], false));
        assert_eq!(first_row_after([0, 0, 0, 2], Move::Right), ([0, 0, 0, 2], false));
    }

    #[test]
    fn test_columns() {
        let res = apply_move(&col([2, 0, 2, 4]), Move::Down);
        let got: Vec<u32> = res.board.values().iter().map(|r| r[0]).collect();
        assert_eq!(got, vec![0, 0, 4, 4]);

        let res = apply_move(&col([2, 0, 2, 4]), Move::Up);
        let got: Vec<u32> = res.board.values().iter().map(|r| r[0]).collect();
        assert_eq!(got, vec![4, 4, 0, 0]);
    }

    #[test]
    fn test_move_whole_board() {
        let b = Board::from_values([[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]]).unwrap();
        let left = apply_move(&b, Move::Left).board;
        assert_eq!(left.values(), [[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [2, 4, 0, 0]]);
        let right = apply_move(&b, Move::Right).board;
        assert_eq!(right.values(), [[2, 4, 8, 16], [0, 2, 16, 4], [0, 0, 0, 8], [0, 0, 2, 4]]);
        let up = apply_move(&b, Move::Up).board;
        assert_eq!(up.values(), [[4, 4, 16, 16], [4, 8, 0, 8], [2, 0, 0, 4], [0, 0, 0, 0]]);
        let down = apply_move(&b, Move::Down).board;
        assert_eq!(down.values(), [[0, 0, 0, 0], [4, 0, 0, 16], [4, 4, 0, 4], [2, 8, 16, 8]]);
    }

    #[test]
    fn merge_survivor_keeps_far_identity() {
        let res = apply_move(&row([2, 0, 2, 0]), Move::Right);
        let survivor = res.board.cell(0, 3).unwrap();
        assert_eq!((survivor.id, survivor.value), (0, 4));
        assert_eq!(res.steps, 4);
        assert_eq!(res.merged_score, 4);
        // ids stay a permutation of the original ones
        assert!(Board::from_cells(res.board.to_flat()).is_ok());
    }

    #[test]
    fn moving_tile_carries_its_id() {
        let b = col([0, 0, 8, 0]);
        let res = apply_move(&b, Move::Up);
        let moved = res.board.cell(0, 0).unwrap();
        assert_eq!((moved.id, moved.value), (8, 8));
        assert_eq!(res.board.cell_by_id(8).map(|c| c.row), Some(0));
    }

    #[test]
    fn unchanged_move_is_idempotent() {
        let b = row([16, 8, 0, 0]);
        let first = apply_move(&b, Move::Left);
        assert!(!first.changed);
        assert_eq!(first.board, b);
        assert_eq!(apply_move(&first.board, Move::Left), first);
        assert!(!can_move(&b, Move::Left));
        assert!(can_move(&b, Move::Right));
    }

    #[test]
    fn tiles_at_the_ceiling_do_not_merge() {
        let top = Board::from_values([[MAX_TILE_VALUE; 4], [0; 4], [0; 4], [0; 4]]).unwrap();
        for _ in 0..2 {
            let res = apply_move(&top, Move::Left);
            assert!(!res.changed);
            assert_eq!(res.board, top);
        }

        let half = MAX_TILE_VALUE / 2;
        let first = apply_move(&row([half, half, half, half]), Move::Left);
        assert_eq!(first.board.values()[0], [MAX_TILE_VALUE, MAX_TILE_VALUE, 0, 0]);
        assert!(Board::from_cells(first.board.to_flat()).is_ok());
        let second = apply_move(&first.board, Move::Left);
        assert!(!second.changed);
        assert_eq!(second.board.values()[0], [MAX_TILE_VALUE, MAX_TILE_VALUE, 0, 0]);
    }
}
