use crate::{Dimensions, GameConfig, GameError, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::fmt;

/// What the agent's game loop needs to know about the hidden board.
pub trait Minefield {
    fn is_mine(&self, pos: Position) -> bool;

    /// Number of mines among the on-board neighbours of `pos`.
    fn nearby_mines(&self, pos: Position) -> u8;

    fn dimensions(&self) -> Dimensions;

    fn mine_count(&self) -> u32;
}

#[derive(Debug, Clone)]
pub struct Board {
    mines: HashSet<Position>,
    dimensions: Dimensions,
}

impl Board {
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, &mut StdRng::from_entropy())
    }

    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng>(config: GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;

        let mut board = Board {
            mines: HashSet::new(),
            dimensions: config.dimensions()?,
        };
        board.place_mines(config.mines, rng);
        Ok(board)
    }

    /// A board with mines at exactly the given positions.
    pub fn from_mines(
        dimensions: Dimensions,
        mines: impl IntoIterator<Item = Position>,
    ) -> Result<Self, GameError> {
        if dimensions.cell_count() == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let mut board = Board {
            mines: HashSet::new(),
            dimensions,
        };
        for pos in mines {
            if !dimensions.contains(pos) {
                return Err(GameError::OutOfBounds(pos));
            }
            board.mines.insert(pos);
        }
        Ok(board)
    }

    fn place_mines<R: Rng>(&mut self, mines_count: u32, rng: &mut R) {
        while self.mines.len() < mines_count as usize {
            let row = rng.gen_range(0..self.dimensions.height());
            let col = rng.gen_range(0..self.dimensions.width());
            if let Some(pos) = self.dimensions.cell(row, col) {
                self.mines.insert(pos);
            }
        }
        log::trace!("Placed {} mines on {:?}", self.mines.len(), self.dimensions);
    }

    pub fn mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    /// True once the flagged cells are exactly the mines.
    pub fn won(&self, flagged: &HashSet<Position>) -> bool {
        *flagged == self.mines
    }
}

impl Minefield for Board {
    fn is_mine(&self, pos: Position) -> bool {
        self.mines.contains(&pos)
    }

    fn nearby_mines(&self, pos: Position) -> u8 {
        self.dimensions
            .neighbors(pos)
            .into_iter()
            .filter(|p| self.mines.contains(p))
            .count() as u8
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn mine_count(&self) -> u32 {
        self.mines.len() as u32
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("{}-", "--".repeat(self.dimensions.width() as usize));
        for row in 0..self.dimensions.height() {
            writeln!(f, "{}", rule)?;
            for col in 0..self.dimensions.width() {
                if self.dimensions.cell(row, col).is_some_and(|pos| self.is_mine(pos)) {
                    write!(f, "|X")?;
                } else {
                    write!(f, "| ")?;
                }
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{}", rule)
    }
}
