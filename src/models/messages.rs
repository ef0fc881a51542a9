use serde::{Deserialize, Serialize};

use crate::game::utils::termination_label;
use crate::game::{GameStatus, GameView, Side};

/// Message sent from client to server
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientMessage {
    pub message_type: String,
    pub move_from: Option<String>,
    pub move_to: Option<String>,
}

/// Message sent from server to client
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ServerMessage {
    pub message_type: String,
    pub fen: Option<String>,
    pub turn: Option<Side>,
    pub turn_indicator: Option<String>,
    pub game_status: Option<String>,
    pub winner: Option<String>,
    pub termination: Option<String>,
    pub last_move: Option<LastMove>,
    pub available_moves: Option<Vec<String>>,
    pub error: Option<String>,
}

/// Last move information
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LastMove {
    pub from: String,
    pub to: String,
}

impl ServerMessage {
    /// Full board state, sent after every change
    pub fn state(view: &GameView) -> Self {
        let termination = match view.status {
            GameStatus::Over { termination, .. } => Some(termination_label(termination).to_string()),
            GameStatus::InProgress => None,
        };

        Self {
            message_type: "state".to_string(),
            fen: Some(view.fen.clone()),
            turn: Some(view.turn),
            turn_indicator: Some(view.turn_indicator.to_string()),
            game_status: Some(view.status_label.to_string()),
            winner: view.winner.map(str::to_string),
            termination,
            last_move: view.last_move.map(|mv| LastMove {
                from: mv.get_source().to_string(),
                to: mv.get_dest().to_string(),
            }),
            ..Self::default()
        }
    }

    /// A drop the board has to undo; carries the position to snap back to
    pub fn move_rejected(fen: String, reason: impl Into<String>) -> Self {
        Self {
            message_type: "move_rejected".to_string(),
            fen: Some(fen),
            error: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn available_moves(moves: Vec<String>) -> Self {
        Self {
            message_type: "available_moves".to_string(),
            available_moves: Some(moves),
            ..Self::default()
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            message_type: "error".to_string(),
            error: Some(reason.into()),
            ..Self::default()
        }
    }
}
