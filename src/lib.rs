pub mod board;
pub mod config;
pub mod constraint;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod position;

pub use board::{Board, Minefield};
pub use config::GameConfig;
pub use constraint::{Constraint, Contradiction};
pub use error::GameError;
pub use game::{Game, GameState, GameStats, MoveOutcome};
pub use knowledge::{InferencePolicy, KnowledgeBase};
pub use position::{Dimensions, Position};
