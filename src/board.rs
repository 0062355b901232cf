use anyhow::{anyhow, Result};

use std::fmt;

use crate::{error::Error, COLS, CONNECT, ROWS};

/// One of the two sides taking turns
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// Who holds the token in a cell
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Owner {
    Empty,
    Player,
    Computer,
}

impl Owner {
    pub fn is_empty(&self) -> bool {
        matches!(self, Owner::Empty)
    }

    pub fn side(&self) -> Option<Side> {
        match self {
            Owner::Empty => None,
            Owner::Player => Some(Side::Player),
            Owner::Computer => Some(Side::Computer),
        }
    }
}

impl From<Side> for Owner {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Owner::Player,
            Side::Computer => Owner::Computer,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub owner: Owner,
    /// part of a detected four-in-a-row
    pub is_winning: bool,
    /// the side that would land here if it dropped in this column
    pub highlight: Option<Side>,
}

impl Cell {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            owner: Owner::Empty,
            is_winning: false,
            highlight: None,
        }
    }
}

// row steps and column steps of the four lines through a cell:
// horizontal, vertical, constant row-col, constant row+col
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// The game grid, row 0 at the top and row `ROWS - 1` at the bottom
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    pub fn new() -> Self {
        let mut cells = [[Cell::new(0, 0); COLS]; ROWS];
        for (row, cells) in cells.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = Cell::new(row, col);
            }
        }
        Self { cells }
    }

    /// Builds a board from a string of 1-indexed columns, sides alternating
    /// from `first`
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Side) -> Result<Self> {
        let mut board = Self::new();
        let mut side = first;
        let mut won = false;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=COLS) => {
                    // abort if the position was already won
                    if won {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    let (row, col) = board.drop_token(column - 1, side)?;
                    won = board.check_win(row, col);
                    side = side.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row][col]
    }

    /// Iterates over all cells, top row first
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flat_map(|row| row.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; COLS]> {
        self.cells.iter()
    }

    /// The row a token dropped in `column` would land in
    pub fn lowest_empty(&self, column: usize) -> Option<usize> {
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][column].owner.is_empty())
    }

    pub fn playable(&self, column: usize) -> bool {
        column < COLS && self.cells[0][column].owner.is_empty()
    }

    pub fn playable_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&column| self.playable(column))
    }

    /// Drops a token into the lowest empty cell of `column`, returning the
    /// (row, col) it landed in
    pub fn drop_token(&mut self, column: usize, side: Side) -> Result<(usize, usize), Error> {
        if column >= COLS {
            return Err(Error::ColumnOutOfRange { column });
        }
        let row = self
            .lowest_empty(column)
            .ok_or(Error::ColumnFull { column })?;
        self.cells[row][column].owner = side.into();
        Ok((row, column))
    }

    /// Empties a cell again, only for speculative placements
    pub fn undo_token(&mut self, row: usize, col: usize) {
        self.cells[row][col].owner = Owner::Empty;
    }

    pub fn is_full(&self) -> bool {
        self.cells().all(|cell| !cell.owner.is_empty())
    }

    /// Checks the four lines through the token at (row, col) for four in a
    /// row, marking the winning cells if one is found
    pub fn check_win(&mut self, row: usize, col: usize) -> bool {
        for &direction in DIRECTIONS.iter() {
            let line = Self::line_through(row, col, direction);
            if let Some(end) = self.scan_line(&line) {
                for &(r, c) in &line[end + 1 - CONNECT..=end] {
                    self.cells[r][c].is_winning = true;
                }
                return true;
            }
        }
        false
    }

    // all cells of the line through (row, col), in scan order
    fn line_through(row: usize, col: usize, (dr, dc): (isize, isize)) -> Vec<(usize, usize)> {
        let in_bounds =
            |r: isize, c: isize| r >= 0 && r < ROWS as isize && c >= 0 && c < COLS as isize;

        // walk back to the start of the line
        let (mut r, mut c) = (row as isize, col as isize);
        while in_bounds(r - dr, c - dc) {
            r -= dr;
            c -= dc;
        }

        let mut line = Vec::with_capacity(ROWS.max(COLS));
        while in_bounds(r, c) {
            line.push((r as usize, c as usize));
            r += dr;
            c += dc;
        }
        line
    }

    // index into `line` of the last cell of the first streak of CONNECT
    fn scan_line(&self, line: &[(usize, usize)]) -> Option<usize> {
        let mut streak = 0;
        let mut streak_owner = Owner::Empty;

        for (i, &(r, c)) in line.iter().enumerate() {
            let owner = self.cells[r][c].owner;
            if owner.is_empty() {
                streak = 0;
            } else if owner == streak_owner {
                streak += 1;
            } else {
                streak = 1;
            }
            streak_owner = owner;

            if streak == CONNECT {
                return Some(i);
            }
        }
        None
    }

    /// Searches the whole board for a four-in-a-row, marking it and
    /// returning its owner
    pub fn find_win(&mut self) -> Option<Side> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let side = self.cells[row][col].owner.side();
                if side.is_some() && self.check_win(row, col) {
                    return side;
                }
            }
        }
        None
    }

    pub fn winning_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells().filter(|cell| cell.is_winning)
    }

    pub fn clear_winning_cells(&mut self) {
        self.cells
            .iter_mut()
            .flat_map(|row| row.iter_mut())
            .for_each(|cell| cell.is_winning = false);
    }

    /// Marks the cell `side` would land in when dropping in `column`,
    /// clearing any previous highlight
    pub fn highlight_column(&mut self, column: usize, side: Side) -> Option<(usize, usize)> {
        self.clear_highlights();
        if column >= COLS {
            return None;
        }
        let row = self.lowest_empty(column)?;
        self.cells[row][column].highlight = Some(side);
        Some((row, column))
    }

    pub fn clear_highlights(&mut self) {
        self.cells
            .iter_mut()
            .flat_map(|row| row.iter_mut())
            .for_each(|cell| cell.highlight = None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.rows() {
            for cell in row.iter() {
                let symbol = match cell.owner {
                    Owner::Empty => '.',
                    Owner::Player => 'P',
                    Owner::Computer => 'C',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        let cols: String = (1..=COLS).map(|x| x.to_string()).collect();
        writeln!(f, "{}", cols)
    }
}
