//! Rules-engine boundary.
//!
//! Everything chess-specific (move generation, legality, mate detection, FEN)
//! comes from the `chess` crate. This module only adapts it to the small
//! interface the orchestrator needs and adds the bookkeeping the crate's
//! `Board` does not carry: move clocks and the repetition history.

use chess::{Board, BoardStatus, ChessMove, Color, MoveGen, Piece};
use serde::{Deserialize, Serialize};
use std::ops::Not;
use std::str::FromStr;

use crate::game::error::GameError;
use crate::game::utils::has_insufficient_material;

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmoves without a capture or pawn move after which the game is drawn.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

/// Snapshot of a game position.
///
/// Snapshots are never edited; `RulesEngine::apply_move` hands back a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Hashes of every position reached so far, current one last.
    history: Vec<u64>,
}

impl GameState {
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let board =
            Board::from_str(fen).map_err(|e| GameError::InvalidFen(format!("{fen}: {e}")))?;
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let halfmove_clock = parse_counter(fields.get(4), 0, fen)?;
        let fullmove_number = parse_counter(fields.get(5), 1, fen)?;

        Ok(Self {
            board,
            halfmove_clock,
            fullmove_number,
            history: vec![board.get_hash()],
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of times the current position has occurred in this game.
    pub fn repetitions(&self) -> usize {
        let current = self.board.get_hash();
        self.history.iter().filter(|&&h| h == current).count()
    }

    /// Full six-field FEN.
    ///
    /// Only placement, side to move and castling come from the crate: it
    /// prints placeholder move counters and names the capturable pawn rather
    /// than the square behind it.
    pub fn to_fen(&self) -> String {
        let board_fen = self.board.to_string();
        let fields: Vec<&str> = board_fen.split_whitespace().take(3).collect();
        let en_passant = self
            .board
            .en_passant()
            .and_then(|pawn| pawn.backward(!self.board.side_to_move()))
            .map_or_else(|| "-".to_string(), |target| target.to_string());
        format!(
            "{} {} {} {}",
            fields.join(" "),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    fn successor(&self, mv: ChessMove) -> Self {
        let resets_clock = self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(mv.get_dest()).is_some();
        let board = self.board.make_move_new(mv);

        let mut history = self.history.clone();
        history.push(board.get_hash());

        Self {
            board,
            halfmove_clock: if resets_clock { 0 } else { self.halfmove_clock + 1 },
            fullmove_number: match self.board.side_to_move() {
                Color::Black => self.fullmove_number + 1,
                Color::White => self.fullmove_number,
            },
            history,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        let board = Board::default();
        Self {
            board,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: vec![board.get_hash()],
        }
    }
}

fn parse_counter(field: Option<&&str>, default: u32, fen: &str) -> Result<u32, GameError> {
    match field {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| GameError::InvalidFen(format!("{fen}: bad move counter {raw}"))),
    }
}

/// The capabilities the orchestrator borrows from a chess-rules library.
pub trait RulesEngine {
    fn initial(&self) -> GameState;

    /// All legal moves for the side to move.
    fn moves(&self, state: &GameState) -> Vec<ChessMove>;

    /// Applies `mv` to a copy of `state`. `None` when the move is not legal.
    fn apply_move(&self, state: &GameState, mv: ChessMove) -> Option<GameState>;

    fn termination(&self, state: &GameState) -> Option<Termination>;

    fn is_game_over(&self, state: &GameState) -> bool {
        self.termination(state).is_some()
    }

    fn turn(&self, state: &GameState) -> Side;

    fn serialize(&self, state: &GameState) -> String;
}

/// `RulesEngine` backed by the `chess` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl RulesEngine for ChessRules {
    fn initial(&self) -> GameState {
        GameState::default()
    }

    fn moves(&self, state: &GameState) -> Vec<ChessMove> {
        MoveGen::new_legal(&state.board).collect()
    }

    fn apply_move(&self, state: &GameState, mv: ChessMove) -> Option<GameState> {
        if !state.board.legal(mv) {
            return None;
        }
        Some(state.successor(mv))
    }

    fn termination(&self, state: &GameState) -> Option<Termination> {
        match state.board.status() {
            BoardStatus::Checkmate => Some(Termination::Checkmate),
            BoardStatus::Stalemate => Some(Termination::Stalemate),
            BoardStatus::Ongoing => {
                if has_insufficient_material(&state.board) {
                    Some(Termination::InsufficientMaterial)
                } else if state.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
                    Some(Termination::FiftyMoveRule)
                } else if state.repetitions() >= 3 {
                    Some(Termination::ThreefoldRepetition)
                } else {
                    None
                }
            }
        }
    }

    fn turn(&self, state: &GameState) -> Side {
        state.board.side_to_move().into()
    }

    fn serialize(&self, state: &GameState) -> String {
        state.to_fen()
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
