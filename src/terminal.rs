use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent,
    },
    execute, queue,
    style::{style, Attribute, Color, PrintStyledContent},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use std::io::{stdout, Write};
use std::time::{Duration, Instant};

use connect4_game::{layout::Layout, *};

const FRAME_TIME: Duration = Duration::from_millis(16);

// the bottom line of the terminal is kept for messages
const STATUS_LINES: u16 = 1;

const COLOUR_BACKGROUND: Color = Color::Rgb { r: 245, g: 255, b: 250 };
const COLOUR_FRAME: Color = Color::Rgb { r: 30, g: 144, b: 255 };
const COLOUR_FRAME_BOTTOM: Color = Color::Rgb { r: 65, g: 105, b: 225 };
const COLOUR_PLAYER: Color = Color::Rgb { r: 255, g: 255, b: 0 };
const COLOUR_PLAYER_WIN: Color = Color::Rgb { r: 255, g: 255, b: 180 };
const COLOUR_COMPUTER: Color = Color::Rgb { r: 255, g: 0, b: 0 };
const COLOUR_COMPUTER_WIN: Color = Color::Rgb { r: 255, g: 150, b: 150 };

/// Runs an interactive game until the user quits
pub fn play(mut game: Game) -> Result<()> {
    let mut stdout = stdout();

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = game_loop(&mut stdout, &mut game);

    // restore the terminal even if the game loop failed
    execute!(stdout, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn game_loop<W: Write>(out: &mut W, game: &mut Game) -> Result<()> {
    let mut screen = Screen::new(terminal::size()?);
    let mut selected: Option<usize> = None;
    let mut last_time = Instant::now();

    loop {
        let now = Instant::now();
        game.advance_computer_think(now - last_time);
        last_time = now;

        game.hover(selected);
        screen.draw(out, game)?;

        if !event::poll(FRAME_TIME)? {
            continue;
        }
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('n') => {
                    game.request_new_game();
                }
                KeyCode::Left => {
                    selected = Some(selected.map_or(0, |column| column.saturating_sub(1)));
                }
                KeyCode::Right => {
                    selected = Some(selected.map_or(0, |column| (column + 1).min(COLS - 1)));
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    game.player_click(selected);
                }
                KeyCode::Char(key) => {
                    // columns are numbered from 1 on screen
                    if let Some(column) = key.to_digit(10).and_then(|d| (d as usize).checked_sub(1))
                    {
                        if column < COLS {
                            selected = Some(column);
                            game.player_click(selected);
                        }
                    }
                }
                _ => {}
            },
            Event::Mouse(MouseEvent::Down(MouseButton::Left, x, y, _)) => {
                selected = screen.column_at(x, y);
                if !game.request_new_game() {
                    game.player_click(selected);
                }
            }
            Event::Mouse(MouseEvent::Drag(_, x, y, _)) => {
                selected = screen.column_at(x, y);
            }
            Event::Resize(width, height) => {
                screen = Screen::new((width, height));
                queue!(out, Clear(ClearType::All))?;
            }
            _ => {}
        }
    }
    Ok(())
}

struct Screen {
    layout: Layout,
    size: (u16, u16),
    // what is currently on the terminal
    drawn: Option<(Board, String)>,
}

impl Screen {
    fn new(size: (u16, u16)) -> Self {
        // terminal cells are about twice as tall as they are wide, so lay the
        // grid out in units of one row and two columns
        let layout = Layout::new(
            size.0 as f64 / 2.0,
            size.1.saturating_sub(STATUS_LINES) as f64,
        );
        Self {
            layout,
            size,
            drawn: None,
        }
    }

    // centre of a terminal cell in layout units
    fn to_layout(x: u16, y: u16) -> (f64, f64) {
        (x as f64 / 2.0 + 0.25, y as f64 + 0.5)
    }

    fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        let (x, y) = Self::to_layout(x, y);
        self.layout.pointer_to_column(x, y)
    }

    fn colour_at(&self, x: u16, y: u16, board: &Board) -> Color {
        let (x, y) = Self::to_layout(x, y);
        let frame = self.layout.frame();

        if frame.contains(x, y) {
            let row = (((y - frame.top) / self.layout.cell_size()) as usize).min(ROWS - 1);
            let col = (((x - frame.left) / self.layout.cell_size()) as usize).min(COLS - 1);
            let (cx, cy) = self.layout.cell_rect(row, col).centre();
            let distance = (x - cx).hypot(y - cy);
            let radius = self.layout.token_radius();

            if distance <= radius {
                let cell = board.cell(row, col);
                return match (cell.owner, cell.highlight) {
                    (Owner::Empty, Some(side)) if distance >= radius * 0.75 => side_colour(side),
                    (Owner::Empty, _) => COLOUR_BACKGROUND,
                    (Owner::Player, _) if cell.is_winning => COLOUR_PLAYER_WIN,
                    (Owner::Player, _) => COLOUR_PLAYER,
                    (Owner::Computer, _) if cell.is_winning => COLOUR_COMPUTER_WIN,
                    (Owner::Computer, _) => COLOUR_COMPUTER,
                };
            }
        }

        // the base of the frame sticks out a little on either side
        let margin = self.layout.margin;
        let base_top = frame.bottom() - margin / 2.0;
        if x > frame.left - margin / 2.0
            && x < frame.right() + margin / 2.0
            && y > base_top
            && y < base_top + margin.max(1.0)
        {
            return COLOUR_FRAME_BOTTOM;
        }

        if frame.contains(x, y) {
            COLOUR_FRAME
        } else {
            COLOUR_BACKGROUND
        }
    }

    /// Redraws the screen, unless the board and message are unchanged
    /// since the last frame
    fn draw<W: Write>(&mut self, out: &mut W, game: &Game) -> Result<()> {
        let message = status_message(game);
        if let Some((board, drawn_message)) = &self.drawn {
            if board == game.board() && *drawn_message == message {
                return Ok(());
            }
        }

        let (width, height) = self.size;
        let board_lines = height.saturating_sub(STATUS_LINES);

        // print runs of the same colour in one go
        for y in 0..board_lines {
            let mut run: Option<(u16, Color)> = None;
            for x in 0..=width {
                let colour = if x < width {
                    Some(self.colour_at(x, y, game.board()))
                } else {
                    None
                };
                match run {
                    Some((_, run_colour)) if Some(run_colour) == colour => continue,
                    Some((start, run_colour)) => {
                        queue!(
                            out,
                            MoveTo(start, y),
                            PrintStyledContent(
                                style(" ".repeat((x - start) as usize)).on(run_colour)
                            )
                        )?;
                    }
                    None => {}
                }
                run = colour.map(|colour| (x, colour));
            }
        }

        queue!(
            out,
            MoveTo(0, board_lines),
            Clear(ClearType::CurrentLine),
            PrintStyledContent(style(message.clone()).attribute(Attribute::Bold))
        )?;
        out.flush()?;

        self.drawn = Some((game.board().clone(), message));
        Ok(())
    }
}

fn side_colour(side: Side) -> Color {
    match side {
        Side::Player => COLOUR_PLAYER,
        Side::Computer => COLOUR_COMPUTER,
    }
}

fn status_message(game: &Game) -> String {
    match game.phase() {
        Phase::AwaitingPlayerMove => {
            format!("Your turn: click a column or press 1-{}, Q quits", COLS)
        }
        Phase::AwaitingComputerThink { .. } | Phase::AwaitingComputerMove => {
            "The computer is thinking...".to_string()
        }
        Phase::GameOver { tied: true } => "Draw! Click or press N to play again".to_string(),
        Phase::GameOver { tied: false } => match game.winner() {
            Some(Side::Player) => "You win! Click or press N to play again".to_string(),
            _ => "The computer wins! Click or press N to play again".to_string(),
        },
    }
}
