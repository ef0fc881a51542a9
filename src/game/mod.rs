pub mod error;
pub mod orchestrator;
pub mod rules;
pub mod utils;

// Re-export important types
pub use error::GameError;
pub use orchestrator::{
    check_terminal, GameOrchestrator, GameStatus, GameView, ReplyOutcome, ReplyTicket, Scoring,
    HUMAN_SIDE, OPPONENT_SIDE,
};
pub use rules::{ChessRules, GameState, RulesEngine, Side, Termination, START_FEN};
