use crate::{Dimensions, GameError};

/// Board size and mine count for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub height: u32,
    pub width: u32,
    pub mines: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl GameConfig {
    pub fn new(height: u32, width: u32, mines: u32) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    pub fn dimensions(&self) -> Result<Dimensions, GameError> {
        Dimensions::try_new(self.height, self.width)
    }

    /// Rejects empty or oversized boards and boards without a single safe
    /// cell.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.height == 0 || self.width == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines >= self.dimensions()?.cell_count() {
            return Err(GameError::TooManyMines {
                height: self.height,
                width: self.width,
                mines: self.mines,
            });
        }
        Ok(())
    }
}
