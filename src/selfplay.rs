//! Headless games against a scripted stand-in for the human player
//!
//! Games run through the same [`Game`] state machine as interactive play,
//! with the thinking pause switched off.

use anyhow::{anyhow, Result};
use indicatif::*;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;

use std::ops::Add;
use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::{
    board::Side,
    config::Config,
    game::{Game, Phase},
    policy::{choose_column, random_column},
};

/// How the stand-in player picks its moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Opponent {
    Random,
    Heuristic,
}

impl FromStr for Opponent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Opponent::Random),
            "heuristic" => Ok(Opponent::Heuristic),
            _ => Err(anyhow!("unknown opponent '{}', expected random or heuristic", s)),
        }
    }
}

/// Results of a batch of games, from the computer's point of view
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tally {
    pub computer_wins: usize,
    pub player_wins: usize,
    pub ties: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.computer_wins + self.player_wins + self.ties
    }
}

impl From<&Game> for Tally {
    fn from(game: &Game) -> Self {
        let mut tally = Self::default();
        match game.winner() {
            Some(Side::Computer) => tally.computer_wins += 1,
            Some(Side::Player) => tally.player_wins += 1,
            None if game.is_tied() => tally.ties += 1,
            None => {}
        }
        tally
    }
}

impl Add for Tally {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            computer_wins: self.computer_wins + other.computer_wins,
            player_wins: self.player_wins + other.player_wins,
            ties: self.ties + other.ties,
        }
    }
}

/// Plays one game to the end
pub fn play_match(opponent: Opponent, config: Config) -> Game {
    let mut game = Game::new(config.with_think_delay(Duration::from_secs(0)));
    let mut rng = match config.seed {
        // keep the stand-in's choices apart from the computer's
        Some(seed) => StdRng::seed_from_u64(!seed),
        None => StdRng::from_entropy(),
    };

    loop {
        match game.phase() {
            Phase::AwaitingPlayerMove => {
                let mut board = game.board().clone();
                let column = match opponent {
                    Opponent::Random => random_column(&board, &mut rng),
                    Opponent::Heuristic => choose_column(&mut board, Side::Player, &mut rng),
                };
                if !game.player_click(column) {
                    break;
                }
            }
            Phase::AwaitingComputerThink { .. } | Phase::AwaitingComputerMove => {
                if game.advance_computer_think(Duration::from_secs(0)).is_none() {
                    break;
                }
            }
            Phase::GameOver { .. } => break,
        }
    }
    game
}

/// Plays `games` games in parallel, showing progress on the terminal
///
/// With a seed, game `i` is seeded with `seed + i` so batches are repeatable.
pub fn run(games: usize, opponent: Opponent, seed: Option<u64>) -> Tally {
    let start = Instant::now();

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let tally = (0..games)
        .into_par_iter()
        .map(|i| {
            let mut config = Config::default();
            if let Some(seed) = seed {
                config = config.with_seed(seed.wrapping_add(i as u64));
            }
            let game = play_match(opponent, config);
            progress.inc(1);
            Tally::from(&game)
        })
        .reduce(Tally::default, |a, b| a + b);

    progress.finish();
    info!(
        "Played {} games against {:?} in {}",
        tally.games(),
        opponent,
        HumanDuration(Instant::now() - start)
    );
    tally
}
