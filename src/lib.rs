//! Tile Link - a link-link tile matching puzzle
//!
//! Core modules:
//! - `game`: Deterministic puzzle core (board, connectivity, match/win logic)
//! - `level`: Difficulty presets and board configuration
//!
//! Rendering and input wiring live outside the core; the `tile-link` binary
//! is a thin terminal front-end that forwards cell choices in and prints
//! state changes out.

pub mod game;
pub mod level;

pub use game::{Board, Cell, ConfigError, Game, Icon, Pos, Round, RoundEvent, RoundPhase};
pub use level::{Level, LevelConfig};

/// Game configuration constants
pub mod consts {
    /// Points awarded for each successfully linked pair
    pub const MATCH_REWARD: u32 = 10;

    /// Round duration in clock ticks (one tick per second of real time)
    pub const ROUND_DURATION_TICKS: u32 = 300;

    /// Ticks a failed pair stays selected before the selection is cleared
    pub const MISMATCH_CLEAR_DELAY_TICKS: u32 = 1;
}
