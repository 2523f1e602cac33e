//! Move-selection policies and a loop that plays a game out with one.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::{can_move, Board, Move};
use crate::error::BoardError;
use crate::game::{Game, Turn};

/// Picks the next move to play.
pub trait Policy {
    /// The next move, or `None` once the policy has nothing left to play.
    fn next_move(&mut self, board: &Board) -> Option<Move>;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn next_move(&mut self, board: &Board) -> Option<Move> {
        (**self).next_move(board)
    }
}

/// Uniform choice among the moves that change the board.
#[derive(Debug, Clone)]
pub struct RandomPolicy<R> {
    rng: R,
}

impl<R: Rng> RandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        RandomPolicy { rng }
    }
}

impl<R: Rng> Policy for RandomPolicy<R> {
    fn next_move(&mut self, board: &Board) -> Option<Move> {
        let legal: Vec<Move> = Move::ALL.into_iter().filter(|&m| can_move(board, m)).collect();
        legal.choose(&mut self.rng).copied()
    }
}

/// Keeps tiles packed into the bottom-left corner: Down, then Left, Right, Up.
#[derive(Debug, Clone, Copy, Default)]
pub struct CornerPolicy;

impl CornerPolicy {
    const PREFERENCE: [Move; 4] = [Move::Down, Move::Left, Move::Right, Move::Up];
}

impl Policy for CornerPolicy {
    fn next_move(&mut self, board: &Board) -> Option<Move> {
        Self::PREFERENCE.into_iter().find(|&m| can_move(board, m))
    }
}

/// Replays a fixed list of moves, whether or not they change the board.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    moves: Vec<Move>,
    next: usize,
}

impl ScriptedPolicy {
    pub fn new(moves: Vec<Move>) -> Self {
        ScriptedPolicy { moves, next: 0 }
    }

    /// Parse a script such as `"left, up down"` or `"LLUR"`.
    pub fn parse(script: &str) -> Result<Self, BoardError> {
        let mut moves = Vec::new();
        for token in script.split(|c: char| c == ',' || c.is_whitespace()).filter(|t| !t.is_empty()) {
            match token.parse::<Move>() {
                Ok(m) => moves.push(m),
                Err(err) => {
                    if !token.chars().all(|c| "udlrUDLR".contains(c)) {
                        return Err(err);
                    }
                    for c in token.chars() {
                        moves.push(c.to_string().parse()?);
                    }
                }
            }
        }
        Ok(Self::new(moves))
    }

    pub fn remaining(&self) -> usize {
        self.moves.len() - self.next
    }
}

impl Policy for ScriptedPolicy {
    fn next_move(&mut self, _board: &Board) -> Option<Move> {
        let m = self.moves.get(self.next).copied()?;
        self.next += 1;
        Some(m)
    }
}

/// Which built-in policy to drive a game with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PolicyKind {
    Random,
    Corner,
}

impl PolicyKind {
    /// Build the policy; `rng` only matters for `Random`.
    pub fn build<R: Rng + Send + 'static>(self, rng: R) -> Box<dyn Policy + Send> {
        match self {
            PolicyKind::Random => Box::new(RandomPolicy::new(rng)),
            PolicyKind::Corner => Box::new(CornerPolicy),
        }
    }
}

/// Outcome of playing a game out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub turns: u32,
    /// Inputs that changed nothing.
    pub wasted: u32,
    /// Cumulative merge score.
    pub score: u64,
    pub board_sum: u64,
    pub highest_tile: u32,
    pub won: bool,
    pub over: bool,
}

/// Feed moves from `policy` into `game` until it finishes, the policy runs
/// dry, or `max_turns` board-changing turns have been played. `on_turn` sees
/// the board after every turn that moved it.
pub fn play_out<R, P, F>(game: &mut Game<R>, policy: &mut P, max_turns: Option<u32>, mut on_turn: F) -> RunSummary
where
    R: Rng,
    P: Policy + ?Sized,
    F: FnMut(Move, &Board),
{
    let mut wasted = 0u32;
    while !game.is_finished() {
        if max_turns.is_some_and(|limit| game.turns() >= limit) {
            break;
        }
        let Some(direction) = policy.next_move(game.board()) else { break };
        match game.play(direction) {
            Turn::Moved(_) => on_turn(direction, game.board()),
            Turn::Unchanged => wasted += 1,
            Turn::Ignored => break,
        }
    }
    let status = game.status();
    RunSummary {
        turns: game.turns(),
        wasted,
        score: game.score(),
        board_sum: status.score,
        highest_tile: game.board().highest_tile(),
        won: status.won,
        over: status.over,
    }
}
