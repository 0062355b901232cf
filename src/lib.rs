//! The board game 'Connect 4' against a heuristic computer opponent
//!
//! The computer looks one move ahead: it takes an immediate win, blocks an
//! immediate loss, and otherwise avoids moves that let the player win in the
//! cell directly above.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_game::{board::Board, policy::choose_column, Side};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // the player has three tokens along the bottom row
//! let mut board = Board::from_moves("1727", Side::Player)?;
//! board.drop_token(2, Side::Player)?;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! assert_eq!(choose_column(&mut board, Side::Computer, &mut rng), Some(3));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod policy;

pub mod config;

pub mod game;

pub mod layout;

pub mod selfplay;


pub use board::{Board, Cell, Owner, Side};
pub use config::Config;
pub use error::Error;
pub use game::{Game, Phase};

/// The number of rows on the game board
pub const ROWS: usize = 6;

/// The number of columns on the game board
pub const COLS: usize = 7;

/// The number of aligned tokens needed to win
pub const CONNECT: usize = 4;

// a four-in-a-row has to fit in both directions
const_assert!(CONNECT <= ROWS && CONNECT <= COLS);
