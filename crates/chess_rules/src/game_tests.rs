use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(state: &mut GameState, from: &str, to: &str) -> Move {
    state
        .play(sq(from), sq(to))
        .unwrap()
        .unwrap_or_else(|| panic!("{from}{to} should be legal"))
}

#[test]
fn test_new_game() {
    let state = GameState::new();
    assert_eq!(state.side_to_move(), Color::White);
    assert_eq!(state.castling_rights(), CastlingRights::all());
    assert_eq!(state.en_passant_target(), None);
    assert!(state.move_history().is_empty());
    assert!(state.setup().is_none());
    assert_eq!(state.white_player().name, "White");
    assert_eq!(
        state.to_fen(),
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    );
}

#[test]
fn test_make_move_updates_everything() {
    let mut state = GameState::new();
    let mv = play(&mut state, "e2", "e4");

    assert_eq!(state.side_to_move(), Color::Black);
    assert_eq!(state.en_passant_target(), Some(sq("e3")));
    assert_eq!(state.move_history(), &[mv]);
    assert_eq!(state.board().piece_at(sq("e2")), None);
    assert_eq!(
        state.board().piece_at(sq("e4")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );

    play(&mut state, "g8", "f6");
    assert_eq!(state.en_passant_target(), None);
    assert_eq!(state.side_to_move(), Color::White);
}

#[test]
fn test_rejected_play_changes_nothing() {
    let mut state = GameState::new();
    let before = state.clone();
    assert_eq!(state.play(sq("e2"), sq("e5")).unwrap(), None);
    assert_eq!(state, before);
}

#[test]
fn test_king_move_revokes_both_rights() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    play(&mut state, "e1", "f1");
    let rights = state.castling_rights();
    assert!(!rights.white_king_side);
    assert!(!rights.white_queen_side);
    assert!(rights.black_king_side);
    assert!(rights.black_queen_side);
}

#[test]
fn test_castling_moves_rook_and_revokes() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    let mv = play(&mut state, "e1", "c1");
    assert!(mv.is_castling());
    assert_eq!(
        state.board().piece_at(sq("d1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(state.board().piece_at(sq("a1")), None);
    assert_eq!(state.castling_rights().to_fen(), "kq");
}

#[test]
fn test_rook_move_revokes_one_side() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    play(&mut state, "h1", "h2");
    assert_eq!(state.castling_rights().to_fen(), "Qkq");

    // Moving back does not restore the right
    play(&mut state, "e8", "e7");
    play(&mut state, "h2", "h1");
    assert!(!state.castling_rights().white_king_side);
}

#[test]
fn test_captured_corner_rook_revokes() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
    play(&mut state, "a1", "a8");
    let rights = state.castling_rights();
    assert!(!rights.white_queen_side);
    assert!(!rights.black_queen_side);
    assert!(rights.black_king_side);
}

#[test]
fn test_draw_offer_availability() {
    let mut state = GameState::new();
    assert!(state.can_current_player_offer_draw());

    state.record_draw_offer_rejection();
    assert!(!state.can_current_player_offer_draw());

    play(&mut state, "e2", "e4");
    // Black was never refused
    assert!(state.can_current_player_offer_draw());
    play(&mut state, "e7", "e5");
    // White's turn again: availability refreshed
    assert!(state.can_current_player_offer_draw());
}

#[test]
fn test_fen_roundtrip() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    assert_eq!(GameState::from_fen(fen).unwrap().to_fen(), fen);

    let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
    let state = GameState::from_fen(fen).unwrap();
    assert_eq!(state.en_passant_target(), Some(sq("d6")));
    assert_eq!(state.to_fen(), fen);
}

#[test]
fn test_fen_rejects_garbage() {
    for bad in [
        "",
        "8/8/8/8/8/8/8/8 w",
        "8/8/8/8/8/8/8/8 x - -",
        "8/8/8/8/8/8/8/8 w KX -",
        "8/8/8/8/8/8/8/8 w - z9",
    ] {
        assert!(
            matches!(GameState::from_fen(bad), Err(RuleError::InvalidFen(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_fen_en_passant_square_must_follow_a_double_step() {
    let state = GameState::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3").unwrap();
    assert_eq!(state.en_passant_target(), Some(sq("e3")));

    for bad in [
        "4k3/8/8/8/8/3Pp3/8/4K3 w - e4",
        "4k3/8/8/8/4P3/8/8/4K3 w - e3",
        "4k3/8/8/3pP3/8/8/8/4K3 b - d6",
    ] {
        assert!(
            matches!(GameState::from_fen(bad), Err(RuleError::InvalidFen(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_standard_fen_is_not_a_setup() {
    let state =
        GameState::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert!(state.setup().is_none());

    let state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
    let (board, side) = state.start_position();
    assert_eq!(side, Color::Black);
    assert_eq!(board.fen_placement(), "4k3/8/8/8/8/8/8/4K3");
}

#[test]
fn test_json_snapshot_roundtrip() {
    let mut state = GameState::new();
    state.set_players(Player::new("Ada", 1850), Player::new("Bob", 0));
    play(&mut state, "e2", "e4");
    play(&mut state, "e7", "e5");
    play(&mut state, "g1", "f3");

    let json = state.to_json().unwrap();
    let restored = GameState::from_json(&json).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.white_player().elo, 1850);
    assert_eq!(restored.move_history().len(), 3);
}

#[test]
fn test_castling_rights_fen_field() {
    assert_eq!(CastlingRights::all().to_fen(), "KQkq");
    assert_eq!(CastlingRights::none().to_fen(), "-");
    assert_eq!(CastlingRights::from_fen("Kq").unwrap().to_fen(), "Kq");
    assert_eq!(CastlingRights::from_fen("-").unwrap(), CastlingRights::none());
}

#[test]
fn test_simulation_state_view() {
    let sim = SimulationState::new(Board::startpos(), Color::Black).with_en_passant_target(sq("e3"));
    assert_eq!(PositionView::side_to_move(&sim), Color::Black);
    assert_eq!(PositionView::en_passant_target(&sim), Some(sq("e3")));
    assert_eq!(PositionView::castling_rights(&sim), CastlingRights::none());
}
