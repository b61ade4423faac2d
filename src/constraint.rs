use crate::Position;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

/// A fact that no mine layout can satisfy together with an existing
/// constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Contradiction {
    #[error("{cell} cannot be a mine, {constraint} has no mines left")]
    ExtraMine { cell: Position, constraint: Constraint },
    #[error("{cell} cannot be safe, {constraint} needs every cell to be a mine")]
    MissingMine { cell: Position, constraint: Constraint },
    #[error("{cell} is already known to be the opposite")]
    Conflict { cell: Position },
    #[error("{subset} does not fit inside {superset}")]
    Subset {
        subset: Constraint,
        superset: Constraint,
    },
}

/// A statement that exactly `count` of `cells` are mines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    cells: BTreeSet<Position>,
    count: usize,
}

impl Constraint {
    /// Panics if `count` exceeds the number of cells.
    pub fn new(cells: impl IntoIterator<Item = Position>, count: usize) -> Self {
        let cells: BTreeSet<Position> = cells.into_iter().collect();
        assert!(
            count <= cells.len(),
            "constraint claims {} mines among {} cells",
            count,
            cells.len()
        );
        Self { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Position> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, when every one of them must be a mine.
    pub fn deduced_mines(&self) -> BTreeSet<Position> {
        if self.count > 0 && self.cells.len() == self.count {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// All cells, when none of them can be a mine.
    pub fn deduced_safe(&self) -> BTreeSet<Position> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Removes `cell` as a mine. Leaves the constraint unchanged and reports
    /// a contradiction if it has no mines left to account for it.
    pub fn resolve_as_mine(&mut self, cell: Position) -> Result<(), Contradiction> {
        if !self.cells.contains(&cell) {
            return Ok(());
        }
        if self.count == 0 {
            return Err(Contradiction::ExtraMine {
                cell,
                constraint: self.clone(),
            });
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(())
    }

    /// Removes `cell` as safe. Leaves the constraint unchanged and reports a
    /// contradiction if every one of its cells must be a mine.
    pub fn resolve_as_safe(&mut self, cell: Position) -> Result<(), Contradiction> {
        if !self.cells.contains(&cell) {
            return Ok(());
        }
        if self.count == self.cells.len() {
            return Err(Contradiction::MissingMine {
                cell,
                constraint: self.clone(),
            });
        }
        self.cells.remove(&cell);
        Ok(())
    }

    /// Subtracts a constraint whose cells are a subset of ours.
    ///
    /// Yields `None` when `subset` is not actually a subset, or when nothing
    /// would be left over.
    pub fn subtract(&self, subset: &Constraint) -> Result<Option<Constraint>, Contradiction> {
        if !subset.cells.is_subset(&self.cells) {
            return Ok(None);
        }
        let remaining: BTreeSet<Position> = self.cells.difference(&subset.cells).copied().collect();
        if remaining.is_empty() {
            return Ok(None);
        }
        match self.count.checked_sub(subset.count) {
            Some(count) if count <= remaining.len() => Ok(Some(Constraint {
                cells: remaining,
                count,
            })),
            _ => Err(Contradiction::Subset {
                subset: subset.clone(),
                superset: self.clone(),
            }),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}
