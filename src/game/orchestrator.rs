//! Game-state orchestration.
//!
//! A `GameOrchestrator` is the single owner of the current position of one
//! game. The human always plays White and the opponent, which plays uniformly
//! random legal moves, always plays Black.
//!
//! The orchestrator does not own a clock. Callers that want the opponent's
//! reply delayed ask for a [`ReplyTicket`] with [`GameOrchestrator::schedule_reply`]
//! and redeem it later with [`GameOrchestrator::play_reply`]. Any state
//! transition in between (a restart included) makes the ticket stale.

use chess::{ChessMove, Piece, Rank, Square};
use log::{debug, error, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::error::GameError;
use crate::game::rules::{GameState, RulesEngine, Side, Termination};
use crate::game::utils::{status_label, turn_indicator, winner_label};

pub const HUMAN_SIDE: Side = Side::White;
pub const OPPONENT_SIDE: Side = Side::Black;

/// How a finished game is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scoring {
    /// Checkmate is a win for the side that delivered it, everything else is a draw.
    #[default]
    Standard,
    /// Any finished game is lost by the side to move, stalemate and draws included.
    SideToMoveLoses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Over {
        winner: Option<Side>,
        termination: Termination,
    },
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        matches!(self, GameStatus::Over { .. })
    }
}

/// Token for a reply scheduled against a specific game generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Played(ChessMove),
    /// There was nothing to play: the game had already ended.
    GameOver(GameStatus),
    /// Not the opponent's turn.
    Skipped,
    /// The ticket was issued before the last state transition.
    Stale,
}

/// Everything the page needs to redraw itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub fen: String,
    pub turn: Side,
    pub turn_indicator: &'static str,
    pub status: GameStatus,
    pub status_label: &'static str,
    pub winner: Option<&'static str>,
    pub last_move: Option<ChessMove>,
}

/// Terminal check for `state`.
///
/// The side to move is the loser whenever the game has ended; whether that
/// loss counts depends on `scoring`.
pub fn check_terminal<E: RulesEngine>(engine: &E, state: &GameState, scoring: Scoring) -> GameStatus {
    let termination = match engine.termination(state) {
        Some(termination) => termination,
        None => return GameStatus::InProgress,
    };

    let loser = engine.turn(state);
    let winner = match (scoring, termination) {
        (_, Termination::Checkmate) | (Scoring::SideToMoveLoses, _) => Some(!loser),
        (Scoring::Standard, _) => None,
    };

    GameStatus::Over { winner, termination }
}

/// Uniform draw over `moves`.
pub fn pick_random_move<R: Rng + ?Sized>(moves: &[ChessMove], rng: &mut R) -> Option<ChessMove> {
    moves.choose(rng).copied()
}

/// Move for a drop from `from` to `to`; pawns reaching the last rank become queens.
pub fn candidate_move(state: &GameState, from: Square, to: Square) -> ChessMove {
    let promotes = state.board().piece_on(from) == Some(Piece::Pawn)
        && matches!(to.get_rank(), Rank::First | Rank::Eighth);
    ChessMove::new(from, to, promotes.then_some(Piece::Queen))
}

pub struct GameOrchestrator<E, R> {
    engine: E,
    rng: R,
    scoring: Scoring,
    state: GameState,
    last_move: Option<ChessMove>,
    generation: u64,
}

impl<E: RulesEngine, R: Rng> GameOrchestrator<E, R> {
    pub fn new(engine: E, rng: R, scoring: Scoring) -> Self {
        let state = engine.initial();
        Self {
            engine,
            rng,
            scoring,
            state,
            last_move: None,
            generation: 0,
        }
    }

    /// Orchestrator continuing from an arbitrary position.
    pub fn from_state(engine: E, rng: R, scoring: Scoring, state: GameState) -> Self {
        Self {
            engine,
            rng,
            scoring,
            state,
            last_move: None,
            generation: 0,
        }
    }

    /// Reset to the standard starting position.
    pub fn initialize(&mut self) {
        self.replace_state(self.engine.initial(), None);
    }

    /// Start a fresh game, invalidating every outstanding reply ticket.
    pub fn restart(&mut self) {
        info!("Restarting game");
        self.initialize();
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn fen(&self) -> String {
        self.engine.serialize(&self.state)
    }

    pub fn turn(&self) -> Side {
        self.engine.turn(&self.state)
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    /// Status of the current position, recomputed on every call.
    pub fn status(&self) -> GameStatus {
        check_terminal(&self.engine, &self.state, self.scoring)
    }

    pub fn attempt_human_move(&mut self, from: Square, to: Square) -> Result<ChessMove, GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if self.turn() != HUMAN_SIDE {
            return Err(GameError::NotYourTurn);
        }

        let mv = candidate_move(&self.state, from, to);
        let next = self
            .engine
            .apply_move(&self.state, mv)
            .ok_or(GameError::IllegalMove { from, to })?;

        debug!("Human played {mv}");
        self.replace_state(next, Some(mv));
        Ok(mv)
    }

    /// Ticket for a delayed opponent reply, if the opponent is to move.
    pub fn schedule_reply(&self) -> Option<ReplyTicket> {
        if self.status().is_over() || self.turn() != OPPONENT_SIDE {
            return None;
        }
        Some(ReplyTicket {
            generation: self.generation,
        })
    }

    /// Redeem a ticket from `schedule_reply` against the state current now.
    pub fn play_reply(&mut self, ticket: ReplyTicket) -> Result<ReplyOutcome, GameError> {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale reply (ticket generation {}, current {})",
                ticket.generation, self.generation
            );
            return Ok(ReplyOutcome::Stale);
        }
        self.select_random_reply()
    }

    pub fn select_random_reply(&mut self) -> Result<ReplyOutcome, GameError> {
        let status = self.status();
        if status.is_over() {
            return Ok(ReplyOutcome::GameOver(status));
        }
        if self.turn() != OPPONENT_SIDE {
            return Ok(ReplyOutcome::Skipped);
        }

        let moves = self.engine.moves(&self.state);
        let mv = match pick_random_move(&moves, &mut self.rng) {
            Some(mv) => mv,
            None => return Ok(ReplyOutcome::GameOver(status)),
        };

        match self.engine.apply_move(&self.state, mv) {
            Some(next) => {
                debug!("Opponent played {mv} out of {} legal moves", moves.len());
                self.replace_state(next, Some(mv));
                Ok(ReplyOutcome::Played(mv))
            }
            None => {
                error!("Opponent move failed: rules engine rejected its own move {mv}");
                Err(GameError::EngineApplication { mv })
            }
        }
    }

    /// Destinations of the human's legal moves starting on `from`.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.status().is_over() || self.turn() != HUMAN_SIDE {
            return Vec::new();
        }
        self.engine
            .moves(&self.state)
            .into_iter()
            .filter(|mv| mv.get_source() == from)
            .map(|mv| mv.get_dest())
            .collect()
    }

    pub fn view(&self) -> GameView {
        let status = self.status();
        let turn = self.turn();
        GameView {
            fen: self.fen(),
            turn,
            turn_indicator: turn_indicator(&status, turn, HUMAN_SIDE),
            status,
            status_label: status_label(&status),
            winner: winner_label(&status),
            last_move: self.last_move,
        }
    }

    fn replace_state(&mut self, state: GameState, last_move: Option<ChessMove>) {
        self.state = state;
        self.last_move = last_move;
        self.generation += 1;

        if let GameStatus::Over { winner, termination } = self.status() {
            info!("Game over by {termination:?}, winner: {winner:?}");
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
