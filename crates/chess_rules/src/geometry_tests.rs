use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn board_with(pieces: &[(&str, Color, PieceKind)]) -> Board {
    let mut b = Board::empty();
    for &(s, color, kind) in pieces {
        b.set_piece(sq(s), Some(Piece::new(color, kind)));
    }
    b
}

#[test]
fn test_knight_centre_and_corner() {
    let b = board_with(&[("d4", Color::White, PieceKind::Knight)]);
    assert_eq!(pseudo_legal_targets(&b, sq("d4")).len(), 8);

    let b = board_with(&[("a1", Color::White, PieceKind::Knight)]);
    let mut targets = pseudo_legal_targets(&b, sq("a1"));
    targets.sort();
    assert_eq!(targets, vec![sq("b3"), sq("c2")]);
}

#[test]
fn test_empty_square_has_no_targets() {
    assert!(pseudo_legal_targets(&Board::empty(), sq("e4")).is_empty());
}

#[test]
fn test_rook_blocked_by_friend_and_enemy() {
    let b = board_with(&[
        ("a1", Color::White, PieceKind::Rook),
        ("a2", Color::White, PieceKind::Pawn),
        ("d1", Color::Black, PieceKind::Knight),
    ]);
    let targets = pseudo_legal_targets(&b, sq("a1"));
    // Up is blocked at once; along the rank it stops on the capture
    assert_eq!(targets.len(), 3);
    assert!(targets.contains(&sq("b1")));
    assert!(targets.contains(&sq("d1")));
    assert!(!targets.contains(&sq("a2")));
    assert!(!targets.contains(&sq("e1")));
}

#[test]
fn test_bishop_and_queen_slide() {
    let b = board_with(&[("c1", Color::White, PieceKind::Bishop)]);
    assert_eq!(pseudo_legal_targets(&b, sq("c1")).len(), 7);

    let b = board_with(&[("d4", Color::White, PieceKind::Queen)]);
    assert_eq!(pseudo_legal_targets(&b, sq("d4")).len(), 27);
}

#[test]
fn test_king_steps() {
    let b = board_with(&[("e1", Color::White, PieceKind::King)]);
    assert_eq!(pseudo_legal_targets(&b, sq("e1")).len(), 5);
}

#[test]
fn test_pawn_pushes() {
    let b = Board::startpos();
    let mut targets = pseudo_legal_targets(&b, sq("e2"));
    targets.sort();
    assert_eq!(targets, vec![sq("e4"), sq("e3")]);

    let b = board_with(&[
        ("e2", Color::White, PieceKind::Pawn),
        ("e3", Color::Black, PieceKind::Pawn),
    ]);
    assert!(pseudo_legal_targets(&b, sq("e2")).is_empty());

    // Double push needs both squares empty
    let b = board_with(&[
        ("e7", Color::Black, PieceKind::Pawn),
        ("e5", Color::White, PieceKind::Pawn),
    ]);
    assert_eq!(pseudo_legal_targets(&b, sq("e7")), vec![sq("e6")]);
}

#[test]
fn test_pawn_captures_only_enemies() {
    let b = board_with(&[
        ("e4", Color::White, PieceKind::Pawn),
        ("d5", Color::Black, PieceKind::Pawn),
        ("f5", Color::White, PieceKind::Knight),
    ]);
    let mut targets = pseudo_legal_targets(&b, sq("e4"));
    targets.sort();
    assert_eq!(targets, vec![sq("d5"), sq("e5")]);
}

#[test]
fn test_pawn_attacks_ignore_occupancy() {
    let b = board_with(&[("e4", Color::White, PieceKind::Pawn)]);
    let mut attacks = attacked_squares(&b, sq("e4"));
    attacks.sort();
    assert_eq!(attacks, vec![sq("d5"), sq("f5")]);

    let b = board_with(&[("a7", Color::Black, PieceKind::Pawn)]);
    assert_eq!(attacked_squares(&b, sq("a7")), vec![sq("b6")]);
}
