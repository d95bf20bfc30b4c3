//! Legality, check detection and move annotation.
//!
//! The engine is stateless. Every function reads a [`PositionView`] and at
//! most builds cloned boards to simulate on; nothing here mutates the state
//! it was given. Illegal requests come back as `Ok(None)` (or an empty set),
//! while a board missing a king the engine needs is a [`RuleError`].

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{
    board::Board,
    chess_move::Move,
    error::{RuleError, RuleResult},
    game::{CastlingRights, SimulationState},
    geometry::{attacked_squares, pseudo_legal_targets},
    types::*,
};

/// What the engine needs to know about a position.
///
/// A full [`crate::GameState`] provides everything. A detached
/// [`SimulationState`] is just a board and a side to move, which is all that
/// check detection and SAN disambiguation ask for.
pub trait PositionView {
    fn board(&self) -> &Board;

    fn side_to_move(&self) -> Color;

    fn castling_rights(&self) -> CastlingRights {
        CastlingRights::none()
    }

    fn en_passant_target(&self) -> Option<Square> {
        None
    }
}

/// Validates `from -> to` for the side to move, promoting to a queen.
pub fn generate_move(
    view: &impl PositionView,
    from: Square,
    to: Square,
) -> RuleResult<Option<Move>> {
    generate_move_with_promotion(view, from, to, PieceKind::Queen)
}

/// Like [`generate_move`] with an explicit promotion piece. The piece only
/// matters when the move turns out to be a promotion, but it must always be
/// a knight, bishop, rook or queen.
pub fn generate_move_with_promotion(
    view: &impl PositionView,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> RuleResult<Option<Move>> {
    if !promotion.is_promotion_target() {
        return Err(RuleError::InvalidPromotion(promotion));
    }

    let candidate = legal_candidates(view, from, &[promotion])?
        .into_iter()
        .find(|mv| mv.to() == to);

    match candidate {
        Some(mv) => annotate(view, mv).map(Some),
        None => {
            trace!(%from, %to, "rejected move request");
            Ok(None)
        }
    }
}

/// Target squares of every legal move of the piece on `sq`.
///
/// Meant for highlighting. Deciding legality belongs to [`generate_move`].
pub fn valid_moves_for_piece(view: &impl PositionView, sq: Square) -> RuleResult<BTreeSet<Square>> {
    Ok(legal_candidates(view, sq, &[PieceKind::Queen])?
        .into_iter()
        .map(|mv| mv.to())
        .collect())
}

/// Every legal move of the side to move, fully annotated. Promotions are
/// listed once, as queen promotions.
pub fn legal_moves(view: &impl PositionView) -> RuleResult<Vec<Move>> {
    legal_candidates_for_side(view, &[PieceKind::Queen])?
        .into_iter()
        .map(|mv| annotate(view, mv))
        .collect()
}

pub fn is_king_in_check(view: &impl PositionView, color: Color) -> RuleResult<bool> {
    king_in_check(view.board(), color)
}

/// The side to move is in check and has no legal move.
pub fn is_checkmate(view: &impl PositionView) -> RuleResult<bool> {
    let side = view.side_to_move();
    Ok(is_king_in_check(view, side)? && !has_legal_move(view)?)
}

/// The side to move is not in check and has no legal move.
pub fn is_stalemate(view: &impl PositionView) -> RuleResult<bool> {
    let side = view.side_to_move();
    Ok(!is_king_in_check(view, side)? && !has_legal_move(view)?)
}

/// True if any piece of `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(sq, _)| attacked_squares(board, sq).contains(&target))
}

pub fn has_legal_move(view: &impl PositionView) -> RuleResult<bool> {
    let side = view.side_to_move();
    for (sq, _) in view.board().pieces(side) {
        if !legal_candidates(view, sq, &[PieceKind::Queen])?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Unannotated legal moves of the side to move, one per promotion piece in
/// `promotions`.
pub(crate) fn legal_candidates_for_side(
    view: &impl PositionView,
    promotions: &[PieceKind],
) -> RuleResult<Vec<Move>> {
    let side = view.side_to_move();
    let mut out = Vec::with_capacity(48);
    for (sq, _) in view.board().pieces(side) {
        out.extend(legal_candidates(view, sq, promotions)?);
    }
    Ok(out)
}

/// Clone-and-apply. The original board is never touched.
pub(crate) fn simulate(board: &Board, mv: &Move) -> Board {
    let mut next = board.clone();
    next.apply_move(mv);
    next
}

fn king_in_check(board: &Board, color: Color) -> RuleResult<bool> {
    let ksq = board.king_square(color).ok_or_else(|| {
        debug!(%color, "king lookup failed");
        RuleError::MissingKing(color)
    })?;
    Ok(is_square_attacked(board, ksq, color.other()))
}

/// Legal moves of the piece on `from`, before check annotation.
fn legal_candidates(
    view: &impl PositionView,
    from: Square,
    promotions: &[PieceKind],
) -> RuleResult<Vec<Move>> {
    let board = view.board();
    let pc = match board.piece_at(from) {
        Some(pc) if pc.color == view.side_to_move() => pc,
        _ => return Ok(Vec::new()),
    };

    let mut candidates = Vec::with_capacity(28);
    for to in pseudo_legal_targets(board, from) {
        let mv = Move::new(from, to, pc).capturing(board.piece_at(to));
        if pc.kind == PieceKind::Pawn && to.row() == pc.color.promotion_row() {
            candidates.extend(promotions.iter().map(|&kind| mv.promoting(kind)));
        } else {
            candidates.push(mv);
        }
    }
    match pc.kind {
        PieceKind::Pawn => candidates.extend(en_passant_candidate(view, from, pc)),
        PieceKind::King => castling_candidates(view, from, pc, &mut candidates)?,
        _ => {}
    }

    // Self-check filter
    let mut legal = Vec::with_capacity(candidates.len());
    for mv in candidates {
        if king_in_check(&simulate(board, &mv), pc.color)? {
            trace!(from = %mv.from(), to = %mv.to(), "leaves own king in check");
        } else {
            legal.push(mv);
        }
    }
    Ok(legal)
}

fn en_passant_candidate(view: &impl PositionView, from: Square, pc: Piece) -> Option<Move> {
    let target = view.en_passant_target()?;
    if from.row() != pc.color.en_passant_row() {
        return None;
    }
    let board = view.board();

    let diagonal = from.offset(pc.color.forward(), -1) == Some(target)
        || from.offset(pc.color.forward(), 1) == Some(target);
    if !diagonal || board.is_occupied(target) {
        return None;
    }

    let victim = board.piece_at(Square::at(from.row(), target.col()))?;
    if victim != Piece::new(pc.color.other(), PieceKind::Pawn) {
        return None;
    }
    Some(Move::new(from, target, pc).en_passant(victim))
}

fn castling_candidates(
    view: &impl PositionView,
    from: Square,
    pc: Piece,
    out: &mut Vec<Move>,
) -> RuleResult<()> {
    let color = pc.color;
    let row = color.home_row();
    if from != Square::at(row, 4) {
        return Ok(());
    }

    let board = view.board();
    let enemy = color.other();
    let rights = view.castling_rights();

    // Can't castle out of check
    if is_square_attacked(board, from, enemy) {
        return Ok(());
    }

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        if !rights.get(color, side) {
            continue;
        }
        let rook_col = side.rook_col();
        if board.piece_at(Square::at(row, rook_col)) != Some(Piece::new(color, PieceKind::Rook)) {
            continue;
        }

        let (lo, hi) = (rook_col.min(4), rook_col.max(4));
        if (lo + 1..hi).any(|col| board.is_occupied(Square::at(row, col))) {
            continue;
        }

        // King's square, transit and landing squares must all be safe
        let target_col = side.king_target_col();
        let (lo, hi) = (target_col.min(4), target_col.max(4));
        if (lo..=hi).any(|col| is_square_attacked(board, Square::at(row, col), enemy)) {
            continue;
        }

        out.push(Move::new(from, Square::at(row, target_col), pc).castling());
    }
    Ok(())
}

/// Sets the check and checkmate tags from the opponent's point of view after
/// `mv` is played.
fn annotate(view: &impl PositionView, mv: Move) -> RuleResult<Move> {
    let opponent = mv.piece_moved().color.other();
    let mut after = SimulationState::new(simulate(view.board(), &mv), opponent);
    if let Some(sq) = mv.skipped_square() {
        after = after.with_en_passant_target(sq);
    }

    let check = is_king_in_check(&after, opponent)?;
    let mate = check && !has_legal_move(&after)?;
    Ok(mv.with_check(check, mate))
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
