//! Shared helpers for the agent integration tests.

use minesweeper_agent::{
    Board, Game, GameConfig, GameState, InferencePolicy, KnowledgeBase, Minefield, MoveOutcome,
};
use rand::rngs::StdRng;

/// Checks every fact the agent has derived against the real board.
pub fn validate_knowledge(agent: &KnowledgeBase<StdRng>, board: &Board) -> bool {
    if !agent.is_consistent() {
        println!("Knowledge base violates its invariants");
        return false;
    }

    for pos in agent.known_mines() {
        if !board.is_mine(*pos) {
            println!("Agent incorrectly identified safe position {} as mine", pos);
            return false;
        }
    }

    for pos in agent.known_safe() {
        if board.is_mine(*pos) {
            println!("Agent incorrectly identified mine {} as safe", pos);
            return false;
        }
    }

    true
}

/// Plays a seeded game to the end, validating knowledge after every move.
///
/// Returns the final state, or `None` if validation failed along the way.
pub fn play_validated(config: GameConfig, seed: u64, policy: InferencePolicy) -> Option<GameState> {
    let board = Board::with_seed(config, seed).unwrap();
    let mut game = Game::with_seed(board, seed, policy);

    while game.state() == GameState::Playing {
        let outcome = game.step().unwrap();
        if let MoveOutcome::Safe(pos) = outcome {
            if game.field().is_mine(pos) {
                println!("Safe move {} was a mine", pos);
                return None;
            }
        }
        if !validate_knowledge(game.agent(), game.field()) {
            return None;
        }
    }

    Some(game.state())
}
