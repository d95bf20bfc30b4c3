//! Per-piece movement geometry.
//!
//! Everything here ignores check. En passant, castling and promotion need the
//! game context and are layered on by [`crate::rules`].

use crate::{board::Board, types::*};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Squares the piece on `from` could reach if check did not matter.
/// Empty when `from` is empty.
pub fn pseudo_legal_targets(board: &Board, from: Square) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    let Some(pc) = board.piece_at(from) else {
        return out;
    };
    match pc.kind {
        PieceKind::Pawn => gen_pawn(board, from, pc.color, &mut out),
        PieceKind::Knight => gen_steps(board, from, pc.color, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => gen_slider(board, from, pc.color, &DIAGONALS, &mut out),
        PieceKind::Rook => gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out),
        PieceKind::Queen => {
            gen_slider(board, from, pc.color, &DIAGONALS, &mut out);
            gen_slider(board, from, pc.color, &ORTHOGONALS, &mut out);
        }
        PieceKind::King => gen_steps(board, from, pc.color, &KING_OFFSETS, &mut out),
    }
    out
}

/// Squares the piece on `from` attacks.
///
/// Same as [`pseudo_legal_targets`] except for pawns, which attack both
/// forward diagonals whatever stands there and never attack by pushing.
pub fn attacked_squares(board: &Board, from: Square) -> Vec<Square> {
    match board.piece_at(from) {
        Some(pc) if pc.kind == PieceKind::Pawn => pawn_attack_squares(from, pc.color).collect(),
        _ => pseudo_legal_targets(board, from),
    }
}

/// The two forward diagonals of a pawn of `color` on `from`, clipped to the board.
pub fn pawn_attack_squares(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dir = color.forward();
    [-1, 1]
        .into_iter()
        .filter_map(move |dc| from.offset(dir, dc))
}

fn gen_pawn(board: &Board, from: Square, c: Color, out: &mut Vec<Square>) {
    let dir = c.forward();

    // forward 1
    if let Some(one) = from.offset(dir, 0)
        && !board.is_occupied(one)
    {
        out.push(one);

        // forward 2 from start
        if from.row() == c.pawn_start_row()
            && let Some(two) = from.offset(2 * dir, 0)
            && !board.is_occupied(two)
        {
            out.push(two);
        }
    }

    // captures
    for to in pawn_attack_squares(from, c) {
        if board.is_occupied_by_enemy(to, c) {
            out.push(to);
        }
    }
}

fn gen_steps(board: &Board, from: Square, c: Color, offsets: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => out.push(to),
                _ => {}
            }
        }
    }
}

fn gen_slider(board: &Board, from: Square, c: Color, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, dc) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(pc) if pc.color != c => {
                    out.push(to);
                    break;
                }
                _ => break,
            }
            cur = to;
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod geometry_tests;
