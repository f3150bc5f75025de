//! Deterministic puzzle core
//!
//! All game logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Explicit clock ticks, no wall-clock reads
//! - No rendering or platform dependencies

pub mod board;
pub mod connect;
pub mod control;
pub mod round;
pub mod selection;

pub use board::{Board, Cell, ConfigError, Icon, Pos};
pub use connect::can_connect;
pub use control::Game;
pub use round::{Outcome, Round, RoundEvent, RoundPhase, RoundSnapshot, SnapshotCell};
pub use selection::{Selection, Toggle};
