//! Turn taking between the human player and the computer
//!
//! A `Game` is driven from outside: clicks arrive through
//! [`Game::player_click`], and the frame loop calls
//! [`Game::advance_computer_think`] with the time since the previous frame.
//! Clicks are only accepted while [`Phase::AwaitingPlayerMove`], and the
//! computer only moves once its think countdown has run out, so there is
//! never more than one side changing the board.

use log::{debug, info};
use rand::{rngs::StdRng, Rng};

use std::time::Duration;

use crate::{board::*, config::Config, error::Error, policy::choose_column};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Phase {
    AwaitingPlayerMove,
    AwaitingComputerThink { remaining: Duration },
    AwaitingComputerMove,
    GameOver { tied: bool },
}

pub struct Game {
    board: Board,
    turn: Side,
    phase: Phase,
    winner: Option<Side>,
    config: Config,
    rng: StdRng,
}

impl Game {
    /// Starts a game on an empty board with a random side to move first
    pub fn new(config: Config) -> Self {
        let mut game = Self::with_board(Board::new(), Side::Player, config);
        game.new_game();
        game
    }

    /// Continues a game from an existing position with `turn` to move
    ///
    /// A position that is already won or full starts out as game over.
    pub fn with_board(board: Board, turn: Side, config: Config) -> Self {
        let mut game = Self {
            board,
            turn,
            phase: Phase::AwaitingPlayerMove,
            winner: None,
            rng: config.rng(),
            config,
        };
        game.board.clear_winning_cells();
        if let Some(side) = game.board.find_win() {
            info!("Position already won by {:?}", side);
            game.winner = Some(side);
            game.phase = Phase::GameOver { tied: false };
        } else if game.board.is_full() {
            info!("Position already drawn");
            game.phase = Phase::GameOver { tied: true };
        } else {
            game.start_turn(turn);
        }
        game
    }

    /// Clears the board and picks who goes first
    pub fn new_game(&mut self) {
        self.board = Board::new();
        self.winner = None;
        let first = if self.rng.gen_bool(0.5) {
            Side::Player
        } else {
            Side::Computer
        };
        info!("New game, {:?} goes first", first);
        self.start_turn(first);
    }

    /// Starts a new game only if the current one has finished
    pub fn request_new_game(&mut self) -> bool {
        if !self.is_over() {
            return false;
        }
        self.new_game();
        true
    }

    /// Drops a player token in `column`, returning whether a move was made
    ///
    /// Clicks outside the grid, into a full column, or out of turn are
    /// ignored.
    pub fn player_click(&mut self, column: Option<usize>) -> bool {
        if self.phase != Phase::AwaitingPlayerMove {
            return false;
        }
        let column = match column {
            Some(column) => column,
            None => return false,
        };
        match self.commit(column, Side::Player) {
            Ok(()) => true,
            Err(err) => {
                debug!("Ignoring click: {}", err);
                false
            }
        }
    }

    /// Counts down the computer's thinking pause, making its move once the
    /// pause is over
    ///
    /// Returns the column the computer played, if it moved on this tick.
    pub fn advance_computer_think(&mut self, delta: Duration) -> Option<usize> {
        match self.phase {
            Phase::AwaitingComputerThink { remaining } => {
                let remaining = remaining.saturating_sub(delta);
                if remaining > Duration::from_secs(0) {
                    self.phase = Phase::AwaitingComputerThink { remaining };
                    return None;
                }
                self.phase = Phase::AwaitingComputerMove;
            }
            Phase::AwaitingComputerMove => {}
            _ => return None,
        }

        let column = match choose_column(&mut self.board, Side::Computer, &mut self.rng) {
            Some(column) => column,
            // nowhere left to play
            None => {
                info!("Draw");
                self.phase = Phase::GameOver { tied: true };
                return None;
            }
        };
        match self.commit(column, Side::Computer) {
            Ok(()) => Some(column),
            Err(err) => {
                debug!("Computer move rejected: {}", err);
                None
            }
        }
    }

    /// Highlights the cell the player would drop into, during the player's turn
    pub fn hover(&mut self, column: Option<usize>) -> Option<(usize, usize)> {
        match column {
            Some(column) if self.phase == Phase::AwaitingPlayerMove => {
                self.board.highlight_column(column, Side::Player)
            }
            _ => {
                self.board.clear_highlights();
                None
            }
        }
    }

    fn commit(&mut self, column: usize, side: Side) -> Result<(), Error> {
        let (row, col) = self.board.drop_token(column, side)?;
        debug!("{:?} dropped in column {} at row {}", side, col + 1, row + 1);

        self.board.clear_highlights();
        self.board.clear_winning_cells();
        if self.board.check_win(row, col) {
            info!("{:?} wins", side);
            self.winner = Some(side);
            self.phase = Phase::GameOver { tied: false };
        } else if self.board.is_full() {
            info!("Draw");
            self.phase = Phase::GameOver { tied: true };
        } else {
            self.start_turn(side.other());
        }
        Ok(())
    }

    fn start_turn(&mut self, side: Side) {
        self.turn = side;
        self.phase = match side {
            Side::Player => Phase::AwaitingPlayerMove,
            Side::Computer => Phase::AwaitingComputerThink {
                remaining: self.config.think_delay,
            },
        };
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn is_tied(&self) -> bool {
        matches!(self.phase, Phase::GameOver { tied: true })
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }
}
