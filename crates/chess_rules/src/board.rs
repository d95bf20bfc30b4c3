use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chess_move::Move;
use crate::error::{RuleError, RuleResult};
use crate::types::*;

/// 8x8 grid of optional pieces, indexed `[row][col]`.
///
/// Pure data: the board knows nothing about whose turn it is or whether a
/// move is legal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            b.grid[0][col] = Some(Piece::new(Color::Black, kind));
            b.grid[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.grid[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.grid[7][col] = Some(Piece::new(Color::White, kind));
        }
        b
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.row() as usize][sq.col() as usize]
    }

    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.grid[sq.row() as usize][sq.col() as usize] = pc;
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// True if `sq` holds a piece of the side opposing `color`.
    pub fn is_occupied_by_enemy(&self, sq: Square, color: Color) -> bool {
        self.piece_at(sq).is_some_and(|pc| pc.color != color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::all().find(|&sq| self.piece_at(sq) == Some(king))
    }

    /// Every occupied square, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, pc)| pc.color == color)
    }

    /// Performs a move that has already been validated.
    ///
    /// Relocates the mover, removes whatever it captured (the en passant
    /// victim sits beside the origin square, not on the destination), moves
    /// the rook when castling and swaps in the promotion piece.
    pub fn apply_move(&mut self, mv: &Move) {
        let from = mv.from();
        let to = mv.to();

        self.set_piece(from, None);
        self.set_piece(to, Some(mv.piece_moved()));

        if let Some(side) = mv.castle_side() {
            let rook_from = Square::at(from.row(), side.rook_col());
            let rook_to = Square::at(from.row(), side.rook_target_col());
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_from, None);
            self.set_piece(rook_to, rook);
        } else if let Some(victim) = mv.en_passant_victim() {
            self.set_piece(victim, None);
        } else if let Some(promoted) = mv.promotion_piece() {
            self.set_piece(to, Some(promoted));
        }
    }

    /// Parses the piece-placement field of a FEN record.
    pub fn from_fen_placement(text: &str) -> RuleResult<Board> {
        let rows: Vec<&str> = text.split('/').collect();
        if rows.len() != 8 {
            return Err(RuleError::InvalidFen(format!(
                "expected 8 ranks, found {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, row_str) in rows.iter().enumerate() {
            let mut col: u32 = 0;
            for ch in row_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col += d;
                } else {
                    let pc = Piece::from_fen_char(ch).ok_or_else(|| {
                        RuleError::InvalidFen(format!("unknown piece character {ch:?}"))
                    })?;
                    if col >= 8 {
                        return Err(RuleError::InvalidFen(format!("rank {row_str:?} too long")));
                    }
                    board.grid[row][col as usize] = Some(pc);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(RuleError::InvalidFen(format!(
                    "rank {row_str:?} covers {col} files"
                )));
            }
        }
        Ok(board)
    }

    pub fn fen_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.grid.iter().enumerate() {
            let mut empty = 0;
            for cell in cells {
                match cell {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.grid.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for cell in cells {
                let ch = cell.map_or('.', |pc| pc.fen_char());
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
