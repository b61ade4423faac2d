use crate::{GameError, InferencePolicy, KnowledgeBase, Minefield, Position};
use rand::rngs::StdRng;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// What a single [`Game::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Played a cell the agent had proven safe.
    Safe(Position),
    /// No safe cell was known, so the agent guessed and survived.
    Random(Position),
    /// Guessed onto a mine.
    Exploded(Position),
    /// Every cell is either played or a known mine.
    Exhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub safe_moves: u32,
    pub random_moves: u32,
}

impl GameStats {
    pub fn total_moves(&self) -> u32 {
        self.safe_moves + self.random_moves
    }
}

/// Lets a [`KnowledgeBase`] play against a hidden minefield.
pub struct Game<M, R = StdRng> {
    field: M,
    agent: KnowledgeBase<R>,
    state: GameState,
    stats: GameStats,
}

impl<M: Minefield> Game<M, StdRng> {
    pub fn new(field: M) -> Self {
        let agent = KnowledgeBase::new(field.dimensions());
        Self::with_agent(field, agent)
    }

    pub fn with_seed(field: M, seed: u64, policy: InferencePolicy) -> Self {
        let agent = KnowledgeBase::with_seed(field.dimensions(), seed).with_policy(policy);
        Self::with_agent(field, agent)
    }
}

impl<M: Minefield, R: Rng> Game<M, R> {
    pub fn with_agent(field: M, agent: KnowledgeBase<R>) -> Self {
        Self {
            field,
            agent,
            state: GameState::Playing,
            stats: GameStats::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stats(&self) -> GameStats {
        self.stats
    }

    pub fn agent(&self) -> &KnowledgeBase<R> {
        &self.agent
    }

    pub fn field(&self) -> &M {
        &self.field
    }

    pub fn step(&mut self) -> Result<MoveOutcome, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::InvalidGameState);
        }

        let (pos, safe) = match self.agent.safe_move() {
            Some(pos) => (pos, true),
            None => match self.agent.random_move() {
                Some(pos) => (pos, false),
                None => {
                    self.state = GameState::Won;
                    return Ok(MoveOutcome::Exhausted);
                }
            },
        };

        if self.field.is_mine(pos) {
            log::debug!("Hit a mine at {}", pos);
            self.state = GameState::Lost;
            return Ok(MoveOutcome::Exploded(pos));
        }

        let count = self.field.nearby_mines(pos);
        log::debug!(
            "{} move {} revealed {}",
            if safe { "Safe" } else { "Random" },
            pos,
            count
        );
        self.agent.observe(pos, count)?;

        if safe {
            self.stats.safe_moves += 1;
        } else {
            self.stats.random_moves += 1;
        }
        self.check_win_condition();

        Ok(if safe {
            MoveOutcome::Safe(pos)
        } else {
            MoveOutcome::Random(pos)
        })
    }

    /// Steps until the game is decided.
    pub fn play(&mut self) -> Result<GameState, GameError> {
        while self.state == GameState::Playing {
            self.step()?;
        }
        log::info!(
            "Game {:?} after {} moves ({} safe, {} random)",
            self.state,
            self.stats.total_moves(),
            self.stats.safe_moves,
            self.stats.random_moves
        );
        Ok(self.state)
    }

    fn check_win_condition(&mut self) {
        let mines = self.field.mine_count();
        let total_safe_cells = self.field.dimensions().cell_count() - mines;
        let all_mines_found = mines > 0 && self.agent.known_mines().len() as u32 == mines;

        if self.agent.moves_made().len() as u32 == total_safe_cells || all_mines_found {
            self.state = GameState::Won;
        }
    }
}
