use chess::{ChessMove, Square};
use std::fmt;

/// Errors produced while driving a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The requested move is not legal in the current position.
    IllegalMove { from: Square, to: Square },
    /// The human tried to move while the opponent is to play.
    NotYourTurn,
    /// The game has ended; only a restart is accepted.
    GameOver,
    /// A square name that could not be parsed (e.g. "z9").
    InvalidSquare(String),
    /// A FEN string the rules library refused.
    InvalidFen(String),
    /// The rules engine failed to apply a move taken from its own legal list.
    EngineApplication { mv: ChessMove },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::IllegalMove { from, to } => write!(f, "illegal move {from}{to}"),
            GameError::NotYourTurn => write!(f, "not your turn"),
            GameError::GameOver => write!(f, "game is over, press Enter to restart"),
            GameError::InvalidSquare(square) => write!(f, "invalid square: {square}"),
            GameError::InvalidFen(reason) => write!(f, "invalid fen: {reason}"),
            GameError::EngineApplication { mv } => {
                write!(f, "rules engine failed to apply its own move {mv}")
            }
        }
    }
}

impl std::error::Error for GameError {}
