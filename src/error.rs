use crate::COLS;

/// Errors from placing tokens on a [`Board`](crate::board::Board)
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid move, column {} full", .column + 1)]
    ColumnFull { column: usize },
    #[error(
        "Invalid move, column {} out of range. Columns must be between 1 and {}",
        .column + 1,
        COLS
    )]
    ColumnOutOfRange { column: usize },
}
