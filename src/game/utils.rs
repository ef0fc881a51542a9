use chess::{Board, Color, Piece, Square, ALL_SQUARES};

use crate::game::orchestrator::GameStatus;
use crate::game::rules::{Side, Termination};

/// Convert a side to the name shown in the winner banner
pub fn side_label(side: Side) -> &'static str {
    match side {
        Side::White => "White",
        Side::Black => "Black",
    }
}

/// Winner label for a finished game, `None` while the game is running
pub fn winner_label(status: &GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Over { winner: Some(side), .. } => Some(side_label(*side)),
        GameStatus::Over { winner: None, .. } => Some("Draw"),
    }
}

/// Text of the turn indicator above the board
pub fn turn_indicator(status: &GameStatus, to_move: Side, human: Side) -> &'static str {
    match status {
        GameStatus::Over { .. } => "Game Over",
        GameStatus::InProgress if to_move == human => "Your Turn",
        GameStatus::InProgress => "Opponent's Turn",
    }
}

/// Short machine-readable status used by the page
pub fn status_label(status: &GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "in_progress",
        GameStatus::Over { winner: Some(Side::White), .. } => "white_wins",
        GameStatus::Over { winner: Some(Side::Black), .. } => "black_wins",
        GameStatus::Over { winner: None, .. } => "draw",
    }
}

pub fn termination_label(termination: Termination) -> &'static str {
    match termination {
        Termination::Checkmate => "checkmate",
        Termination::Stalemate => "stalemate",
        Termination::InsufficientMaterial => "insufficient material",
        Termination::FiftyMoveRule => "fifty-move rule",
        Termination::ThreefoldRepetition => "threefold repetition",
    }
}

#[derive(Debug, Default)]
struct Material {
    pawns: u32,
    knights: u32,
    bishops: u32,
    rooks: u32,
    queens: u32,
    // Square parity of each bishop, indexed by (rank + file) % 2
    bishop_parity: [bool; 2],
}

impl Material {
    fn add(&mut self, piece: Piece, square: Square) {
        match piece {
            Piece::Pawn => self.pawns += 1,
            Piece::Knight => self.knights += 1,
            Piece::Bishop => {
                self.bishops += 1;
                let parity = (square.get_rank().to_index() + square.get_file().to_index()) % 2;
                self.bishop_parity[parity] = true;
            }
            Piece::Rook => self.rooks += 1,
            Piece::Queen => self.queens += 1,
            Piece::King => {}
        }
    }

    fn heavy_or_pawns(&self) -> bool {
        self.pawns + self.rooks + self.queens > 0
    }

    fn minors(&self) -> u32 {
        self.knights + self.bishops
    }
}

/// Check if the board has insufficient material for checkmate
pub fn has_insufficient_material(board: &Board) -> bool {
    let mut white = Material::default();
    let mut black = Material::default();

    for square in ALL_SQUARES {
        if let (Some(piece), Some(color)) = (board.piece_on(square), board.color_on(square)) {
            match color {
                Color::White => white.add(piece, square),
                Color::Black => black.add(piece, square),
            }
        }
    }

    if white.heavy_or_pawns() || black.heavy_or_pawns() {
        return false;
    }

    // King vs King, or King and a single minor piece vs King
    if white.minors() + black.minors() <= 1 {
        return true;
    }

    // Only bishops left, every one of them on the same square colour
    let knights = white.knights + black.knights;
    let on_even = white.bishop_parity[0] || black.bishop_parity[0];
    let on_odd = white.bishop_parity[1] || black.bishop_parity[1];
    knights == 0 && !(on_even && on_odd)
}

#[cfg(test)]
#[path = "utils_tests.rs"]
mod utils_tests;
