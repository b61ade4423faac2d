use crate::GameError;
use itertools::iproduct;
use std::fmt;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The eight surrounding coordinates, unclipped.
    pub fn neighbors(&self) -> impl Iterator<Item = Position> + '_ {
        (-1..=1).flat_map(move |dr| {
            (-1..=1).filter_map(move |dc| {
                if dr == 0 && dc == 0 {
                    None
                } else {
                    Some(Position::new(self.row + dr, self.col + dc))
                }
            })
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// Board bounds, `height` rows by `width` columns.
///
/// Both sides fit an `i32` coordinate and the cell count fits a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    height: u32,
    width: u32,
}

impl Dimensions {
    /// Panics if the board is too large; see [`Dimensions::try_new`].
    pub fn new(height: u32, width: u32) -> Self {
        match Self::try_new(height, width) {
            Ok(dimensions) => dimensions,
            Err(_) => panic!("{}x{} board is too large", height, width),
        }
    }

    /// Rejects sides that do not fit an `i32` coordinate and boards whose
    /// cell count overflows a `u32`.
    pub fn try_new(height: u32, width: u32) -> Result<Self, GameError> {
        if i32::try_from(height).is_err() || i32::try_from(width).is_err() {
            return Err(GameError::InvalidDimensions);
        }
        height.checked_mul(width).ok_or(GameError::InvalidDimensions)?;
        Ok(Self { height, width })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && i64::from(pos.row) < i64::from(self.height)
            && i64::from(pos.col) < i64::from(self.width)
    }

    pub fn cell_count(&self) -> u32 {
        // Checked in `try_new`.
        self.height * self.width
    }

    /// The cell at `row`, `col`, if it lies on the board.
    pub fn cell(&self, row: u32, col: u32) -> Option<Position> {
        let pos = Position::new(i32::try_from(row).ok()?, i32::try_from(col).ok()?);
        self.contains(pos).then_some(pos)
    }

    /// Neighbours of `pos` that lie on the board.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        pos.neighbors().filter(|p| self.contains(*p)).collect()
    }

    /// Every cell in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        iproduct!(0..coordinate(self.height), 0..coordinate(self.width)).map(Position::from)
    }
}

fn coordinate(side: u32) -> i32 {
    i32::try_from(side).unwrap_or(i32::MAX)
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.row, 5);
        assert_eq!(pos.col, 10);
        assert_eq!(pos.to_string(), "(5, 10)");
    }

    #[test]
    fn test_neighbors() {
        let pos = Position::new(1, 1);
        let neighbors: Vec<Position> = pos.neighbors().collect();

        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&Position::new(0, 0))); // Top-left
        assert!(neighbors.contains(&Position::new(0, 1))); // Top
        assert!(neighbors.contains(&Position::new(0, 2))); // Top-right
        assert!(neighbors.contains(&Position::new(1, 0))); // Left
        assert!(neighbors.contains(&Position::new(1, 2))); // Right
        assert!(neighbors.contains(&Position::new(2, 0))); // Bottom-left
        assert!(neighbors.contains(&Position::new(2, 1))); // Bottom
        assert!(neighbors.contains(&Position::new(2, 2))); // Bottom-right
        assert!(!neighbors.contains(&pos));
    }

    #[test]
    fn test_clipped_neighbors() {
        let dims = Dimensions::new(8, 8);

        let corner = dims.neighbors(Position::new(0, 0));
        assert_eq!(corner.len(), 3);
        assert!(corner.contains(&Position::new(0, 1)));
        assert!(corner.contains(&Position::new(1, 0)));
        assert!(corner.contains(&Position::new(1, 1)));

        assert_eq!(dims.neighbors(Position::new(0, 4)).len(), 5);
        assert_eq!(dims.neighbors(Position::new(7, 7)).len(), 3);
        assert_eq!(dims.neighbors(Position::new(3, 3)).len(), 8);
        assert!(Dimensions::new(1, 1).neighbors(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_positions_row_major() {
        let dims = Dimensions::new(2, 3);
        let all: Vec<Position> = dims.positions().collect();

        assert_eq!(all.len(), dims.cell_count() as usize);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[2], Position::new(0, 2));
        assert_eq!(all[3], Position::new(1, 0));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_contains() {
        let dims = Dimensions::new(3, 4);
        assert!(dims.contains(Position::new(2, 3)));
        assert!(!dims.contains(Position::new(3, 0)));
        assert!(!dims.contains(Position::new(0, 4)));
        assert!(!dims.contains(Position::new(-1, 0)));
    }

    #[test]
    fn test_cell_lookup() {
        let dims = Dimensions::new(3, 4);
        assert_eq!(dims.cell(2, 3), Some(Position::new(2, 3)));
        assert_eq!(dims.cell(3, 0), None);
        assert_eq!(dims.cell(u32::MAX, 0), None);
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        assert_eq!(
            Dimensions::try_new(u32::MAX, 1),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            Dimensions::try_new(70_000, 70_000),
            Err(GameError::InvalidDimensions)
        );

        let widest = Dimensions::try_new(1, i32::MAX as u32).unwrap();
        assert_eq!(widest.cell_count(), i32::MAX as u32);
        assert_eq!(widest.positions().next(), Some(Position::new(0, 0)));
        assert!(widest.contains(Position::new(0, i32::MAX - 1)));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_overflow() {
        Dimensions::new(100_000, 100_000);
    }
}
