use super::*;
use std::str::FromStr;

fn board(fen: &str) -> Board {
    Board::from_str(fen).unwrap()
}

#[test]
fn start_position_has_sufficient_material() {
    assert!(!has_insufficient_material(&Board::default()));
}

#[test]
fn king_and_minor_vs_king_is_insufficient() {
    assert!(has_insufficient_material(&board("8/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
    assert!(has_insufficient_material(&board("8/8/8/4k3/8/8/8/1N2K3 w - - 0 1")));
    assert!(has_insufficient_material(&board("8/8/2n5/4k3/8/8/8/4K3 w - - 0 1")));
}

#[test]
fn single_rook_or_pawn_is_sufficient() {
    assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/8/R3K3 w - - 0 1")));
    assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1")));
}

#[test]
fn opposite_bishops_depend_on_square_colour() {
    // c1 and f8 are both dark squares
    assert!(has_insufficient_material(&board("5b2/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
    // c1 is dark, c8 is light
    assert!(!has_insufficient_material(&board("2b5/8/8/4k3/8/8/8/2B1K3 w - - 0 1")));
}

#[test]
fn any_number_of_same_coloured_bishops_is_insufficient() {
    // b2 and c1 are both dark squares
    assert!(has_insufficient_material(&board("4k3/8/8/8/8/8/1B6/2B1K3 w - - 0 1")));
    // c1 dark, f1 light
    assert!(!has_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1")));
    // bishop plus knight can still mate
    assert!(!has_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1KN2 w - - 0 1")));
}

#[test]
fn two_knights_are_treated_as_sufficient() {
    assert!(!has_insufficient_material(&board("8/8/8/4k3/8/8/8/1N2KN2 w - - 0 1")));
}

#[test]
fn labels_follow_status() {
    let white_mates = GameStatus::Over {
        winner: Some(Side::White),
        termination: Termination::Checkmate,
    };
    let drawn = GameStatus::Over {
        winner: None,
        termination: Termination::Stalemate,
    };

    assert_eq!(winner_label(&GameStatus::InProgress), None);
    assert_eq!(winner_label(&white_mates), Some("White"));
    assert_eq!(winner_label(&drawn), Some("Draw"));

    assert_eq!(status_label(&white_mates), "white_wins");
    assert_eq!(status_label(&drawn), "draw");
    assert_eq!(termination_label(Termination::FiftyMoveRule), "fifty-move rule");
}

#[test]
fn turn_indicator_texts() {
    let over = GameStatus::Over {
        winner: Some(Side::Black),
        termination: Termination::Checkmate,
    };

    assert_eq!(
        turn_indicator(&GameStatus::InProgress, Side::White, Side::White),
        "Your Turn"
    );
    assert_eq!(
        turn_indicator(&GameStatus::InProgress, Side::Black, Side::White),
        "Opponent's Turn"
    );
    assert_eq!(turn_indicator(&over, Side::White, Side::White), "Game Over");
}
