use anyhow::Result;
use clap::Parser;

use std::time::Duration;

use connect4_game::{
    config::DEFAULT_THINK_DELAY,
    selfplay::{self, Opponent},
    *,
};

mod terminal;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Connect 4 against the computer", long_about = None)]
struct Args {
    /// Milliseconds the computer pauses before making its move
    #[arg(long, default_value_t = DEFAULT_THINK_DELAY.as_millis() as u64)]
    think_ms: u64,

    /// Seed for the first turn and the computer's choices
    #[arg(long)]
    seed: Option<u64>,

    /// Play this many games headless instead of an interactive game
    #[arg(long)]
    selfplay: Option<usize>,

    /// Who stands in for the human in headless games: random or heuristic
    #[arg(long, default_value = "random")]
    opponent: Opponent,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = Config::default().with_think_delay(Duration::from_millis(args.think_ms));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    if let Some(games) = args.selfplay {
        let tally = selfplay::run(games, args.opponent, args.seed);
        let percent = |n: usize| 100.0 * n as f64 / tally.games().max(1) as f64;

        println!("Games played: {}", tally.games());
        println!(
            "Computer wins: {} ({:.1}%)",
            tally.computer_wins,
            percent(tally.computer_wins)
        );
        println!(
            "{:?} opponent wins: {} ({:.1}%)",
            args.opponent,
            tally.player_wins,
            percent(tally.player_wins)
        );
        println!("Draws: {} ({:.1}%)", tally.ties, percent(tally.ties));
        return Ok(());
    }

    terminal::play(Game::new(config))
}
