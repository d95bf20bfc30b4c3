use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CastleSide, Piece, PieceKind, Square};

/// A fully annotated move.
///
/// Only the rule engine builds these, and every flag is settled before the
/// move is handed out. Applying it is a separate step (`Board::apply_move`,
/// `GameState::make_move`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    promotion_piece: Option<Piece>,
    is_castling: bool,
    is_en_passant: bool,
    is_promotion: bool,
    is_check: bool,
    is_checkmate: bool,
}

impl Move {
    pub(crate) fn new(from: Square, to: Square, piece_moved: Piece) -> Self {
        Self {
            from,
            to,
            piece_moved,
            piece_captured: None,
            promotion_piece: None,
            is_castling: false,
            is_en_passant: false,
            is_promotion: false,
            is_check: false,
            is_checkmate: false,
        }
    }

    pub(crate) fn capturing(mut self, captured: Option<Piece>) -> Self {
        self.piece_captured = captured;
        self
    }

    pub(crate) fn castling(mut self) -> Self {
        self.is_castling = true;
        self
    }

    pub(crate) fn en_passant(mut self, victim: Piece) -> Self {
        self.is_en_passant = true;
        self.piece_captured = Some(victim);
        self
    }

    pub(crate) fn promoting(mut self, kind: PieceKind) -> Self {
        self.is_promotion = true;
        self.promotion_piece = Some(Piece::new(self.piece_moved.color, kind));
        self
    }

    pub(crate) fn with_check(mut self, is_check: bool, is_checkmate: bool) -> Self {
        self.is_check = is_check;
        self.is_checkmate = is_checkmate;
        self
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    pub fn promotion_piece(&self) -> Option<Piece> {
        self.promotion_piece
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    pub fn is_castling(&self) -> bool {
        self.is_castling
    }

    pub fn is_en_passant(&self) -> bool {
        self.is_en_passant
    }

    pub fn is_promotion(&self) -> bool {
        self.is_promotion
    }

    pub fn is_check(&self) -> bool {
        self.is_check
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        if self.is_castling {
            CastleSide::from_king_target(self.to.col())
        } else {
            None
        }
    }

    /// Square of the pawn removed by an en passant capture. It sits on the
    /// mover's origin row, not on the destination.
    pub fn en_passant_victim(&self) -> Option<Square> {
        if !self.is_en_passant {
            return None;
        }
        Some(Square::at(self.from.row(), self.to.col()))
    }

    /// True for a pawn advancing two rows.
    pub fn is_double_step(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// The square a double step passes over, which becomes the en passant
    /// target.
    pub fn skipped_square(&self) -> Option<Square> {
        if !self.is_double_step() {
            return None;
        }
        Some(Square::at((self.from.row() + self.to.row()) / 2, self.from.col()))
    }

    /// Coordinate notation such as `e2e4` or `e7e8n`.
    pub fn to_coordinate(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(p) = self.promotion_piece {
            let ch = match p.kind {
                PieceKind::Rook => 'r',
                PieceKind::Bishop => 'b',
                PieceKind::Knight => 'n',
                _ => 'q',
            };
            s.push(ch);
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} from {} to {}",
            self.piece_moved.color, self.piece_moved.kind, self.from, self.to
        )
    }
}
