use rand::{rngs::StdRng, SeedableRng};

use std::time::Duration;

/// How long the computer pauses before committing its move
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);

/// Settings for a [`Game`](crate::game::Game)
#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub think_delay: Duration,
    /// seed for the first turn and the computer's choices, random if not set
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_think_delay(mut self, think_delay: Duration) -> Self {
        self.think_delay = think_delay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            think_delay: DEFAULT_THINK_DELAY,
            seed: None,
        }
    }
}
