//! The heuristic computer opponent
//!
//! Every playable column is sorted into a [`Priority`] bucket by trying the
//! move on the board and taking it back again. The move is then picked at
//! random from the best bucket that has any columns in it.
//!
//! The look-ahead is a single ply deep: a column is only recognised as
//! dangerous when the player could win in the cell directly above it.

use log::debug;
use rand::{seq::SliceRandom, Rng};

use std::ops::Deref;

use crate::{board::*, COLS};

/// How attractive a column is to the side about to move, best first
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Priority {
    /// wins the game outright
    Win = 0,
    /// the opponent would win by playing here next
    Block = 1,
    /// no immediate consequence
    Neutral = 2,
    /// lets the opponent win in the cell directly above
    Sacrifice = 3,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Win,
        Priority::Block,
        Priority::Neutral,
        Priority::Sacrifice,
    ];
}

/// A speculative token, taken back off the board when dropped
pub struct Trial<'a> {
    board: &'a mut Board,
    row: usize,
    col: usize,
}

impl<'a> Trial<'a> {
    /// Drops a token for `side` in `column`, or `None` if the column is full
    pub fn place(board: &'a mut Board, column: usize, side: Side) -> Option<Self> {
        let (row, col) = board.drop_token(column, side).ok()?;
        Some(Self { board, row, col })
    }

    /// Would this token complete a four-in-a-row?
    pub fn wins(&mut self) -> bool {
        self.board.check_win(self.row, self.col)
    }

    /// Tries a token for `side` in the cell directly above this one
    pub fn above(&mut self, side: Side) -> Option<Trial<'_>> {
        Trial::place(&mut *self.board, self.col, side)
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &*self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.board.undo_token(self.row, self.col);
    }
}

/// Sorts every column into a priority bucket for `side`, `None` for full columns
///
/// The board is left exactly as it was found, with no winning cells marked.
pub fn classify(board: &mut Board, side: Side) -> [Option<Priority>; COLS] {
    let mut priorities = [None; COLS];

    // moves that win immediately
    for (column, priority) in priorities.iter_mut().enumerate() {
        if let Some(mut trial) = Trial::place(board, column, side) {
            if trial.wins() {
                *priority = Some(Priority::Win);
            }
        }
    }

    // moves that stop the opponent winning there next turn
    for (column, priority) in priorities.iter_mut().enumerate() {
        if priority.is_some() {
            continue;
        }
        if let Some(mut trial) = Trial::place(board, column, side.other()) {
            if trial.wins() {
                *priority = Some(Priority::Block);
            }
        }
    }

    // moves that open up the cell above for the opponent
    for (column, priority) in priorities.iter_mut().enumerate() {
        if priority.is_some() {
            continue;
        }
        if let Some(mut trial) = Trial::place(board, column, side) {
            let gives_away = match trial.above(side.other()) {
                Some(mut reply) => reply.wins(),
                // the column is now full
                None => false,
            };
            *priority = Some(if gives_away {
                Priority::Sacrifice
            } else {
                Priority::Neutral
            });
        }
    }

    board.clear_winning_cells();
    priorities
}

/// Chooses the column `side` should play, `None` only if the board is full
pub fn choose_column<R: Rng + ?Sized>(
    board: &mut Board,
    side: Side,
    rng: &mut R,
) -> Option<usize> {
    let priorities = classify(board, side);
    debug!("{:?} column priorities: {:?}", side, priorities);

    for &bucket in Priority::ALL.iter() {
        let candidates: Vec<usize> = (0..COLS)
            .filter(|&column| priorities[column] == Some(bucket))
            .collect();
        if let Some(&column) = candidates.choose(rng) {
            debug!(
                "{:?} picked column {} from {:?} bucket {:?}",
                side,
                column + 1,
                bucket,
                candidates
            );
            return Some(column);
        }
    }
    None
}

/// Any playable column, uniformly at random
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let columns: Vec<usize> = board.playable_columns().collect();
    columns.choose(rng).copied()
}
