use log::trace;
use rand::Rng;

use super::state::{Board, CELLS};

/// Draw a new tile value: 2 with probability 0.9, 4 with probability 0.1.
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_range(0..10) < 9 { 2 } else { 4 }
}

/// Place one new tile in a uniformly chosen empty cell.
///
/// A full board comes back unchanged. No other cell and no `id` is touched.
pub fn spawn_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    let empty: Vec<usize> = board.empty_positions().collect();
    if empty.is_empty() {
        return *board;
    }
    let pos = empty[rng.gen_range(0..empty.len())];
    let mut out = *board;
    let mut cell = out.at(pos);
    cell.value = random_tile_value(rng);
    trace!("spawned {} at ({}, {})", cell.value, cell.row, cell.column);
    out.place(cell);
    out
}

/// A fresh board with two starting tiles at distinct random cells.
pub fn create_initial_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let first_value = random_tile_value(rng);
    let second_value = random_tile_value(rng);
    let first = rng.gen_range(0..CELLS);
    let mut second = rng.gen_range(0..CELLS);
    while second == first {
        second = rng.gen_range(0..CELLS);
    }
    let mut board = Board::empty();
    for (pos, value) in [(first, first_value), (second, second_value)] {
        let mut cell = board.at(pos);
        cell.value = value;
        board.place(cell);
    }
    board
}
