#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use dyn_array::*;
pub use engine::*;
pub use error::*;
pub use grid::*;
pub use stream::*;
pub use types::*;

mod cell;
mod dyn_array;
mod engine;
mod error;
mod grid;
mod stream;
mod types;

/// Size and mine count of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const TINY: Self = Self::new_unchecked(5, 5, 3);
    pub const EASY: Self = Self::new_unchecked(9, 9, 10);
    pub const MEDIUM: Self = Self::new_unchecked(16, 16, 40);
    pub const HARD: Self = Self::new_unchecked(16, 30, 99);

    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self { rows, cols, mines }
    }

    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    /// A board needs at least one cell and room for every mine, otherwise placing them
    /// could never finish.
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::ConfigurationError(
                "board needs at least one row and one column",
            ));
        }
        if self.mines > self.total_cells() {
            return Err(GameError::ConfigurationError("more mines than cells"));
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        // u16 * u16 always fits a u32
        self.rows as CellCount * self.cols as CellCount
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

/// Difficulty picked when starting a game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Tiny,
    Easy,
    Medium,
    Hard,
    Custom,
}

impl Level {
    /// Fixed board of a named level, `None` for [`Level::Custom`].
    pub const fn config(self) -> Option<BoardConfig> {
        use Level::*;
        match self {
            Tiny => Some(BoardConfig::TINY),
            Easy => Some(BoardConfig::EASY),
            Medium => Some(BoardConfig::MEDIUM),
            Hard => Some(BoardConfig::HARD),
            Custom => None,
        }
    }
}
