//! Difficulty presets and board configuration
//!
//! A level fixes the board dimensions and how many distinct icon types the
//! generator cycles through. Chosen once per round, immutable while the
//! round runs.

use serde::{Deserialize, Serialize};

use crate::game::ConfigError;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Level {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Level::Easy),
            "medium" | "med" => Some(Level::Medium),
            "hard" => Some(Level::Hard),
            _ => None,
        }
    }

    /// Board rows for this preset
    pub fn rows(&self) -> usize {
        match self {
            Level::Easy => 6,
            Level::Medium => 8,
            Level::Hard => 10,
        }
    }

    /// Board columns for this preset
    pub fn cols(&self) -> usize {
        match self {
            Level::Easy => 6,
            Level::Medium => 8,
            Level::Hard => 10,
        }
    }

    /// Distinct icon types the generator cycles through
    pub fn icon_types(&self) -> u8 {
        match self {
            Level::Easy => 8,
            Level::Medium => 12,
            Level::Hard => 16,
        }
    }

    /// Full board configuration for this preset
    pub fn config(&self) -> LevelConfig {
        LevelConfig {
            rows: self.rows(),
            cols: self.cols(),
            icon_types: self.icon_types(),
        }
    }
}

/// Board configuration for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub rows: usize,
    pub cols: usize,
    /// Distinct icon types to cycle through when pairing
    pub icon_types: u8,
}

impl LevelConfig {
    /// Total cell count for this configuration
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Check that this configuration can produce a fully pairable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_count() % 2 != 0 {
            return Err(ConfigError::OddCellCount {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.icon_types == 0 {
            return Err(ConfigError::NoIconTypes);
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Level::default().config()
    }
}
