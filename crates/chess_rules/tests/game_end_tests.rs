//! Tests for end-of-game detection
//!
//! Covers the two terminal conditions the rules decide on their own:
//! checkmate and stalemate.

use chess_rules::{
    Color, GameResult, GameState, Square, has_legal_move, is_checkmate, is_king_in_check,
    is_stalemate, legal_moves,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    // Black king on a8, White queen on b6, White king on c7
    let state = GameState::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(legal_moves(&state).unwrap().is_empty());
    assert!(
        !is_king_in_check(&state, Color::Black).unwrap(),
        "Stalemate means king is not in check"
    );
    assert!(is_stalemate(&state).unwrap());
    assert!(!is_checkmate(&state).unwrap());
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // White king on g6, white pawn on g7, black king on g8
    let state = GameState::from_fen("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1").unwrap();

    assert!(!has_legal_move(&state).unwrap());
    assert!(is_stalemate(&state).unwrap());
    assert_eq!(GameResult::of(&state).unwrap(), GameResult::Draw);
}

#[test]
fn test_stalemate_only_for_side_to_move() {
    // Same placement with white to move is an ordinary position
    let state = GameState::from_fen("6k1/6P1/6K1/8/8/8/8/8 w - - 0 1").unwrap();
    assert!(!is_stalemate(&state).unwrap());
    assert_eq!(GameResult::of(&state).unwrap(), GameResult::Ongoing);
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_checkmate_is_not_stalemate() {
    // Scholar's mate
    let state = GameState::from_fen(
        "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
    )
    .unwrap();

    assert!(legal_moves(&state).unwrap().is_empty());
    assert!(
        is_king_in_check(&state, Color::Black).unwrap(),
        "Checkmate means king IS in check"
    );
    assert!(is_checkmate(&state).unwrap());
    assert!(!is_stalemate(&state).unwrap());
    assert_eq!(GameResult::of(&state).unwrap(), GameResult::WhiteWins);
}

#[test]
fn test_check_is_not_checkmate() {
    let state = GameState::from_fen(
        "rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2",
    )
    .unwrap();

    assert!(!legal_moves(&state).unwrap().is_empty());
    assert!(is_king_in_check(&state, Color::Black).unwrap());
    assert!(!is_checkmate(&state).unwrap());
}

#[test]
fn test_scholars_mate_played_out() {
    let mut state = GameState::new();
    let moves = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
    ];
    for (from, to) in moves {
        let mv = state.play(sq(from), sq(to)).unwrap();
        assert!(mv.is_some_and(|m| !m.is_check()), "{from}{to}");
    }

    let mate = state.play(sq("h5"), sq("f7")).unwrap().unwrap();
    assert!(mate.is_capture());
    assert!(mate.is_checkmate());
    assert!(is_checkmate(&state).unwrap());
    assert_eq!(state.to_fen().split(' ').next(), Some("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR"));
}
