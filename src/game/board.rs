//! Board state and generation
//!
//! A board is a fixed rows x cols grid of paired icon cells. Matched cells
//! stay in the grid as placeholders; connectivity treats them as empty
//! space a line may pass through.

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::level::LevelConfig;

/// Board configuration errors, fatal to round start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The level produces an odd total cell count, so icons cannot be paired
    OddCellCount { rows: usize, cols: usize },
    /// The level provides no icon types to pair
    NoIconTypes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OddCellCount { rows, cols } => {
                write!(f, "{rows}x{cols} board has an odd cell count")
            }
            ConfigError::NoIconTypes => write!(f, "level has no icon types"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Opaque icon identifier, `0..icon_types`
///
/// Core logic only ever compares icons for equality; [`Icon::glyph`] is a
/// display hint for text front-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Icon(pub u8);

impl Icon {
    /// Display character for this icon ('A' onward, wrapping after 26)
    pub fn glyph(&self) -> char {
        (b'A' + self.0 % 26) as char
    }
}

/// Grid position, the identity of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single cell: an icon at a fixed position
///
/// `matched` transitions false -> true exactly once and never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub icon: Icon,
    pub pos: Pos,
    pub matched: bool,
}

/// A rows x cols grid of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Generate a fresh shuffled board for the given configuration
    ///
    /// Allocates `rows * cols / 2` icon pairs cycling through the level's
    /// icon types, shuffles the flat icon list, and lays it out row-major
    /// with every cell unmatched.
    pub fn generate(config: &LevelConfig, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        config.validate()?;

        let total = config.cell_count();
        let mut icons = Vec::with_capacity(total);
        for pair in 0..total / 2 {
            let icon = Icon((pair % config.icon_types as usize) as u8);
            icons.push(icon);
            icons.push(icon);
        }
        icons.shuffle(rng);

        let cells = icons
            .into_iter()
            .enumerate()
            .map(|(i, icon)| Cell {
                icon,
                pos: Pos::new(i / config.cols, i % config.cols),
                matched: false,
            })
            .collect();

        log::debug!(
            "generated {}x{} board with {} icon types",
            config.rows,
            config.cols,
            config.icon_types
        );

        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            cells,
        })
    }

    /// Build a board from an explicit row-major icon layout (scripted tests)
    #[cfg(test)]
    pub(crate) fn from_icons(rows: usize, cols: usize, icons: &[Icon]) -> Self {
        assert_eq!(icons.len(), rows * cols);
        let cells = icons
            .iter()
            .enumerate()
            .map(|(i, &icon)| Cell {
                icon,
                pos: Pos::new(i / cols, i % cols),
                matched: false,
            })
            .collect();
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at `pos`, or None when out of bounds
    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells.get(pos.row * self.cols + pos.col)
        } else {
            None
        }
    }

    /// Whether the cell at `pos` has been matched (false when out of bounds)
    pub fn is_matched(&self, pos: Pos) -> bool {
        self.get(pos).map(|c| c.matched).unwrap_or(false)
    }

    /// Whether every cell on the board has been matched
    pub fn all_matched(&self) -> bool {
        self.cells.iter().all(|c| c.matched)
    }

    /// Count of cells not yet matched
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|c| !c.matched).count()
    }

    /// Mark the cell at `pos` as matched
    pub(crate) fn mark_matched(&mut self, pos: Pos) {
        if pos.row < self.rows && pos.col < self.cols {
            self.cells[pos.row * self.cols + pos.col].matched = true;
        }
    }
}
