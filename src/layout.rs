//! Placement of the grid on a drawing surface
//!
//! Cells are square and the grid is centred along whichever axis has room
//! to spare, leaving a small margin around the frame.

use crate::{COLS, ROWS};

/// Margin around the frame, as a fraction of the shorter side of the surface
pub const MARGIN: f64 = 0.02;

/// Diameter of a token, as a fraction of the cell size
pub const TOKEN_DIAMETER: f64 = 0.7;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strictly inside, points on the border belong to neither neighbour
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right() && y > self.top && y < self.bottom()
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Layout {
    /// the space kept clear around the frame
    pub margin: f64,
    cell: f64,
    origin: (f64, f64),
}

impl Layout {
    pub fn new(width: f64, height: f64) -> Self {
        let margin = MARGIN * width.min(height);

        let (cell, origin) =
            if (width - margin * 2.0) * (ROWS as f64) / (COLS as f64) < height - margin * 2.0 {
                // portrait
                let cell = (width - margin * 2.0) / COLS as f64;
                (cell, (margin, (height - cell * ROWS as f64) / 2.0))
            } else {
                // landscape
                let cell = (height - margin * 2.0) / ROWS as f64;
                (cell, ((width - cell * COLS as f64) / 2.0, margin))
            };

        Self {
            margin,
            cell,
            origin,
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect {
            left: self.origin.0 + col as f64 * self.cell,
            top: self.origin.1 + row as f64 * self.cell,
            width: self.cell,
            height: self.cell,
        }
    }

    /// The area covered by all cells
    pub fn frame(&self) -> Rect {
        Rect {
            left: self.origin.0,
            top: self.origin.1,
            width: self.cell * COLS as f64,
            height: self.cell * ROWS as f64,
        }
    }

    pub fn token_radius(&self) -> f64 {
        self.cell * TOKEN_DIAMETER / 2.0
    }

    /// The column under a pointer, or `None` outside the grid
    pub fn pointer_to_column(&self, x: f64, y: f64) -> Option<usize> {
        (0..ROWS)
            .flat_map(|row| (0..COLS).map(move |col| (row, col)))
            .find(|&(row, col)| self.cell_rect(row, col).contains(x, y))
            .map(|(_, col)| col)
    }
}
