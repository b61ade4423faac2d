use crate::{Constraint, Contradiction, Dimensions, GameError, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// How far the deduction loop runs after each observation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InferencePolicy {
    /// Direct rule, one subset pass, then the direct rule again if the
    /// subset pass derived anything. Later observations pick up whatever
    /// this leaves behind.
    #[default]
    SinglePass,
    /// Alternate both rules until neither finds anything new.
    Saturate,
}

/// The agent's accumulated knowledge about one board.
///
/// Every cell in `mines` or `safe` has already been removed from all stored
/// constraints, so constraints only ever mention unresolved cells.
#[derive(Debug, Clone)]
pub struct KnowledgeBase<R = StdRng> {
    dimensions: Dimensions,
    moves_made: HashSet<Position>,
    mines: HashSet<Position>,
    safe: HashSet<Position>,
    constraints: Vec<Constraint>,
    policy: InferencePolicy,
    rng: R,
}

struct Snapshot {
    moves_made: HashSet<Position>,
    mines: HashSet<Position>,
    safe: HashSet<Position>,
    constraints: Vec<Constraint>,
}

impl KnowledgeBase<StdRng> {
    pub fn new(dimensions: Dimensions) -> Self {
        Self::with_rng(dimensions, StdRng::from_entropy())
    }

    pub fn with_seed(dimensions: Dimensions, seed: u64) -> Self {
        Self::with_rng(dimensions, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> KnowledgeBase<R> {
    pub fn with_rng(dimensions: Dimensions, rng: R) -> Self {
        Self {
            dimensions,
            moves_made: HashSet::new(),
            mines: HashSet::new(),
            safe: HashSet::new(),
            constraints: Vec::new(),
            policy: InferencePolicy::default(),
            rng,
        }
    }

    pub fn with_policy(mut self, policy: InferencePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn policy(&self) -> InferencePolicy {
        self.policy
    }

    pub fn moves_made(&self) -> &HashSet<Position> {
        &self.moves_made
    }

    pub fn known_mines(&self) -> &HashSet<Position> {
        &self.mines
    }

    pub fn known_safe(&self) -> &HashSet<Position> {
        &self.safe
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Records `cell` as a mine. Fails without changing anything if the cell
    /// is known safe or a stored constraint has no mine left for it.
    pub fn mark_mine(&mut self, cell: Position) -> Result<(), GameError> {
        self.atomically(|kb| kb.resolve_mine(cell).map(drop))?;
        Ok(())
    }

    /// Records `cell` as safe. Fails without changing anything if the cell is
    /// a known mine or a stored constraint needs it to be one.
    pub fn mark_safe(&mut self, cell: Position) -> Result<(), GameError> {
        self.atomically(|kb| kb.resolve_safe(cell).map(drop))?;
        Ok(())
    }

    /// Records that `cell` was revealed with `count` neighbouring mines and
    /// runs the deduction loop.
    ///
    /// A rejected observation leaves the knowledge base untouched, including
    /// one that only turns out to be impossible during deduction.
    pub fn observe(&mut self, cell: Position, count: u8) -> Result<(), GameError> {
        if !self.dimensions.contains(cell) {
            return Err(GameError::OutOfBounds(cell));
        }

        let neighbors = self.dimensions.neighbors(cell);
        let known_mines = neighbors.iter().filter(|n| self.mines.contains(*n)).count();
        let unknown: Vec<Position> = neighbors
            .iter()
            .copied()
            .filter(|n| !self.mines.contains(n) && !self.safe.contains(n))
            .collect();

        let remaining = usize::from(count);
        if self.mines.contains(&cell)
            || remaining < known_mines
            || remaining - known_mines > unknown.len()
        {
            log::warn!(
                "Rejecting observation {} = {}: {} known mines and {} unknown cells nearby",
                cell,
                count,
                known_mines,
                unknown.len()
            );
            return Err(GameError::InconsistentObservation { cell, count });
        }

        self.atomically(|kb| {
            kb.moves_made.insert(cell);
            kb.resolve_safe(cell)?;
            if !unknown.is_empty() {
                let constraint = Constraint::new(unknown, remaining - known_mines);
                log::trace!("New constraint from {}: {}", cell, constraint);
                kb.constraints.push(constraint);
            }
            kb.run_inference()
        })
        .map_err(|contradiction| {
            log::warn!("Rejecting observation {} = {}: {}", cell, count, contradiction);
            GameError::InconsistentObservation { cell, count }
        })?;

        debug_assert!(self.is_consistent());
        Ok(())
    }

    /// Adds a constraint from outside the observation flow, reduced against
    /// what is already known. Call [`KnowledgeBase::infer`] afterwards to draw
    /// conclusions from it.
    pub fn insert_constraint(&mut self, mut constraint: Constraint) -> Result<(), GameError> {
        for &cell in &self.mines {
            constraint.resolve_as_mine(cell)?;
        }
        for &cell in &self.safe {
            constraint.resolve_as_safe(cell)?;
        }
        if !constraint.is_empty() {
            self.constraints.push(constraint);
        }
        Ok(())
    }

    /// Runs the deduction loop according to the configured policy. On a
    /// contradiction the knowledge base is left as it was before the call.
    pub fn infer(&mut self) -> Result<(), GameError> {
        self.atomically(Self::run_inference)?;
        Ok(())
    }

    fn run_inference(&mut self) -> Result<(), Contradiction> {
        match self.policy {
            InferencePolicy::SinglePass => {
                self.propagate_direct()?;
                if self.derive_subsets()? {
                    self.propagate_direct()?;
                }
            }
            InferencePolicy::Saturate => loop {
                while self.propagate_direct()? {}
                if !self.derive_subsets()? {
                    break;
                }
            },
        }
        self.constraints.retain(|c| !c.is_empty());
        Ok(())
    }

    /// Applies `update`, restoring the previous knowledge if it fails.
    fn atomically<T>(
        &mut self,
        update: impl FnOnce(&mut Self) -> Result<T, Contradiction>,
    ) -> Result<T, Contradiction> {
        let snapshot = Snapshot {
            moves_made: self.moves_made.clone(),
            mines: self.mines.clone(),
            safe: self.safe.clone(),
            constraints: self.constraints.clone(),
        };
        let result = update(self);
        if result.is_err() {
            self.moves_made = snapshot.moves_made;
            self.mines = snapshot.mines;
            self.safe = snapshot.safe;
            self.constraints = snapshot.constraints;
        }
        result
    }

    /// Adds `cell` to the known mines and removes it from every constraint.
    /// Returns whether the cell was new. May leave partial changes on error.
    fn resolve_mine(&mut self, cell: Position) -> Result<bool, Contradiction> {
        if self.safe.contains(&cell) {
            return Err(Contradiction::Conflict { cell });
        }
        if !self.mines.insert(cell) {
            return Ok(false);
        }
        for constraint in &mut self.constraints {
            constraint.resolve_as_mine(cell)?;
        }
        Ok(true)
    }

    fn resolve_safe(&mut self, cell: Position) -> Result<bool, Contradiction> {
        if self.mines.contains(&cell) {
            return Err(Contradiction::Conflict { cell });
        }
        if !self.safe.insert(cell) {
            return Ok(false);
        }
        for constraint in &mut self.constraints {
            constraint.resolve_as_safe(cell)?;
        }
        Ok(true)
    }

    /// One pass of the direct rule. Returns whether any new cell was resolved.
    fn propagate_direct(&mut self) -> Result<bool, Contradiction> {
        self.constraints.retain(|c| !c.is_empty());

        let mut changed = false;
        // Marking rewrites every constraint in place, so facts found early in
        // the pass are already visible to the constraints that follow.
        for idx in 0..self.constraints.len() {
            let mines = self.constraints[idx].deduced_mines();
            let safe = self.constraints[idx].deduced_safe();

            for cell in mines {
                if self.resolve_mine(cell)? {
                    log::debug!("Deduced mine at {}", cell);
                    changed = true;
                }
            }
            for cell in safe {
                if self.resolve_safe(cell)? {
                    log::debug!("Deduced safe cell at {}", cell);
                    changed = true;
                }
            }
        }
        Ok(changed)
    }

    /// One pass of the subset rule. Returns whether any constraint was added.
    fn derive_subsets(&mut self) -> Result<bool, Contradiction> {
        let mut derived: Vec<Constraint> = Vec::new();

        for (i, subset) in self.constraints.iter().enumerate() {
            for (j, superset) in self.constraints.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(constraint) = superset.subtract(subset)? {
                    if !self.constraints.contains(&constraint) && !derived.contains(&constraint) {
                        log::trace!("Derived {} from {} and {}", constraint, superset, subset);
                        derived.push(constraint);
                    }
                }
            }
        }

        let added = !derived.is_empty();
        self.constraints.extend(derived);
        Ok(added)
    }

    /// A known-safe cell that has not been played yet, smallest first.
    pub fn safe_move(&self) -> Option<Position> {
        self.safe
            .iter()
            .filter(|cell| !self.moves_made.contains(*cell) && !self.mines.contains(*cell))
            .min()
            .copied()
    }

    /// Any unplayed cell not known to be a mine, chosen at random.
    pub fn random_move(&mut self) -> Option<Position> {
        let candidates: Vec<Position> = self
            .dimensions
            .positions()
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// Checks that mines and safe cells are disjoint and that every
    /// constraint is in range and mentions only unresolved cells.
    pub fn is_consistent(&self) -> bool {
        self.mines.is_disjoint(&self.safe)
            && self.constraints.iter().all(|c| {
                c.count() <= c.len()
                    && c
                        .cells()
                        .iter()
                        .all(|cell| !self.mines.contains(cell) && !self.safe.contains(cell))
            })
    }
}
