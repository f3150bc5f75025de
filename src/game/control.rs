//! Game controller
//!
//! Owns the configured level, the per-round seeding RNG, and the current
//! round. Rounds are replaced wholesale on restart, discarding board,
//! selection, score, clock, and any pending scheduled tasks at once.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::level::{Level, LevelConfig};

use super::board::{ConfigError, Pos};
use super::round::{Round, RoundEvent, RoundSnapshot};

/// A session of rounds at a configurable difficulty
#[derive(Debug, Clone)]
pub struct Game {
    config: LevelConfig,
    /// Draws each round's board seed; seeded once per session
    rng: Pcg32,
    round: Round,
}

impl Game {
    /// Start a session, with the first round already running
    ///
    /// Fails with [`ConfigError`] when the level cannot produce a pairable
    /// board; no round starts in that case.
    pub fn new(config: LevelConfig, session_seed: u64) -> Result<Self, ConfigError> {
        let mut rng = Pcg32::seed_from_u64(session_seed);
        let round = Round::new(&config, rng.random())?;
        Ok(Self { config, rng, round })
    }

    /// Start a session at a preset difficulty
    pub fn at_level(level: Level, session_seed: u64) -> Result<Self, ConfigError> {
        Self::new(level.config(), session_seed)
    }

    pub fn config(&self) -> LevelConfig {
        self.config
    }

    /// The round currently being played
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Begin a fresh round with a new configuration
    ///
    /// Rejects an invalid configuration before touching the current round,
    /// which keeps running.
    pub fn start_round(&mut self, config: LevelConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.round = Round::new(&config, self.rng.random())?;
        log::info!("new round at {}x{}", config.rows, config.cols);
        Ok(())
    }

    /// Abandon the current round and start over at the same level
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.start_round(self.config)
    }

    /// Switch difficulty, restarting with a fresh round
    pub fn set_level(&mut self, level: Level) -> Result<(), ConfigError> {
        self.start_round(level.config())
    }

    /// Forward a cell-chosen event to the current round
    pub fn choose_cell(&mut self, pos: Pos) -> Vec<RoundEvent> {
        self.round.choose_cell(pos)
    }

    /// Advance the current round's clock by one tick
    pub fn tick(&mut self) -> Vec<RoundEvent> {
        self.round.tick()
    }

    /// Render view of the current round
    pub fn snapshot(&self) -> RoundSnapshot {
        self.round.snapshot()
    }
}
