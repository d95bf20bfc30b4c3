//! Standard Algebraic Notation.
//!
//! Writing SAN needs the position each move was played from, so
//! [`SanWriter`] keeps its own board and advances it one move at a time.
//! Parsing goes the other way: a SAN token is matched against the legal
//! moves of a position and must select exactly one.

use thiserror::Error;
use tracing::trace;

use crate::{
    board::Board,
    chess_move::Move,
    error::RuleError,
    game::SimulationState,
    rules::{self, PositionView},
    types::*,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("Malformed SAN: {0:?}")]
    Syntax(String),

    #[error("No legal move matches {0:?}")]
    Illegal(String),

    #[error("Ambiguous move: {0:?}")]
    Ambiguous(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Replays a move list on its own board and renders each move as SAN.
#[derive(Clone, Debug)]
pub struct SanWriter {
    board: Board,
}

impl Default for SanWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl SanWriter {
    /// Replay from the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::startpos())
    }

    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// The position the next move will be judged against.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Renders `mv` against the current replay board, then plays it there.
    pub fn write(&mut self, mv: &Move) -> Result<String, RuleError> {
        let san = move_to_san(&self.board, mv)?;
        self.board.apply_move(mv);
        Ok(san)
    }

    pub fn write_all(&mut self, moves: &[Move]) -> Result<Vec<String>, RuleError> {
        moves.iter().map(|mv| self.write(mv)).collect()
    }
}

/// SAN for `mv` played from `board`.
pub fn move_to_san(board: &Board, mv: &Move) -> Result<String, RuleError> {
    let suffix = if mv.is_checkmate() {
        "#"
    } else if mv.is_check() {
        "+"
    } else {
        ""
    };

    match mv.castle_side() {
        Some(CastleSide::KingSide) => return Ok(format!("O-O{suffix}")),
        Some(CastleSide::QueenSide) => return Ok(format!("O-O-O{suffix}")),
        None => {}
    }

    let piece = mv.piece_moved();
    let mut san = String::with_capacity(8);

    match piece.kind.san_letter() {
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguation(board, mv)?);
        }
        None if mv.is_capture() => san.push(mv.from().file_char()),
        None => {}
    }

    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&mv.to().to_string());

    if let Some(letter) = mv.promotion_piece().and_then(|p| p.kind.san_letter()) {
        san.push('=');
        san.push(letter);
    }
    san.push_str(suffix);
    Ok(san)
}

/// Finds the first other piece of the same colour and kind (row-major) that
/// could also reach the destination and picks the shortest distinguishing
/// prefix: file, then rank, then the full square.
fn disambiguation(board: &Board, mv: &Move) -> Result<String, RuleError> {
    let piece = mv.piece_moved();
    let view = SimulationState::new(board.clone(), piece.color);

    for (sq, other) in board.pieces(piece.color) {
        if sq == mv.from() || other.kind != piece.kind {
            continue;
        }
        if !rules::valid_moves_for_piece(&view, sq)?.contains(&mv.to()) {
            continue;
        }

        let from = mv.from();
        return Ok(if sq.col() != from.col() {
            from.file_char().to_string()
        } else if sq.row() != from.row() {
            from.rank_char().to_string()
        } else {
            from.to_string()
        });
    }
    Ok(String::new())
}

/// Resolves a SAN token to the one legal move it names in `view`.
///
/// Accepts `O-O`/`0-0`, `O-O-O`/`0-0-0`, an optional piece letter, file
/// and/or rank disambiguator, `x`, the destination, `=N|B|R|Q`, and trailing
/// `+`, `#`, `!` or `?` marks.
pub fn parse_san(view: &impl PositionView, text: &str) -> Result<Move, SanError> {
    let token = text
        .trim()
        .trim_end_matches(['+', '#', '!', '?']);
    if token.is_empty() {
        return Err(SanError::Syntax(text.to_string()));
    }

    if let Some(side) = castle_token(token) {
        return parse_castle(view, text, side);
    }

    let req = SanRequest::parse(token).ok_or_else(|| SanError::Syntax(text.to_string()))?;
    let side = view.side_to_move();
    let promotion = req.promotion.unwrap_or(PieceKind::Queen);

    let mut found: Option<Move> = None;
    for (from, pc) in view.board().pieces(side) {
        if !req.matches_source(from, pc) {
            continue;
        }
        let Some(mv) = rules::generate_move_with_promotion(view, from, req.to, promotion)? else {
            continue;
        };
        if mv.is_capture() != req.capture || (req.promotion.is_some() && !mv.is_promotion()) {
            continue;
        }
        if found.is_some() {
            return Err(SanError::Ambiguous(text.to_string()));
        }
        found = Some(mv);
    }

    found.ok_or_else(|| {
        trace!(san = text, "no legal move matches");
        SanError::Illegal(text.to_string())
    })
}

fn castle_token(token: &str) -> Option<CastleSide> {
    match token {
        "O-O" | "0-0" => Some(CastleSide::KingSide),
        "O-O-O" | "0-0-0" => Some(CastleSide::QueenSide),
        _ => None,
    }
}

fn parse_castle(view: &impl PositionView, text: &str, side: CastleSide) -> Result<Move, SanError> {
    let row = view.side_to_move().home_row();
    let from = Square::at(row, 4);
    let to = Square::at(row, side.king_target_col());
    match rules::generate_move(view, from, to)? {
        Some(mv) if mv.is_castling() => Ok(mv),
        _ => Err(SanError::Illegal(text.to_string())),
    }
}

/// The pieces of a non-castling SAN token.
struct SanRequest {
    kind: PieceKind,
    file: Option<u8>,
    rank: Option<u8>,
    capture: bool,
    to: Square,
    promotion: Option<PieceKind>,
}

impl SanRequest {
    fn parse(token: &str) -> Option<SanRequest> {
        let (body, promotion) = match token.split_once('=') {
            Some((body, promo)) => {
                let mut chars = promo.chars();
                let kind = chars.next().and_then(PieceKind::from_san_letter)?;
                if chars.next().is_some() || !kind.is_promotion_target() {
                    return None;
                }
                (body, Some(kind))
            }
            None => (token, None),
        };

        if !body.is_ascii() || body.len() < 2 {
            return None;
        }
        let (rest, dest) = body.split_at(body.len() - 2);
        let to = dest.parse::<Square>().ok()?;

        let mut chars = rest.chars().peekable();
        let kind = match chars.peek().copied().and_then(PieceKind::from_san_letter) {
            Some(kind) => {
                chars.next();
                kind
            }
            None => PieceKind::Pawn,
        };

        let mut req = SanRequest {
            kind,
            file: None,
            rank: None,
            capture: false,
            to,
            promotion,
        };
        for ch in chars {
            match ch {
                'a'..='h' if req.file.is_none() && !req.capture => {
                    req.file = Some(ch as u8 - b'a');
                }
                '1'..='8' if req.rank.is_none() && !req.capture => {
                    req.rank = Some(b'8' - ch as u8);
                }
                'x' if !req.capture => req.capture = true,
                _ => return None,
            }
        }

        if req.kind == PieceKind::Pawn && req.capture != req.file.is_some() {
            return None;
        }
        if req.promotion.is_some() && req.kind != PieceKind::Pawn {
            return None;
        }
        Some(req)
    }

    fn matches_source(&self, from: Square, pc: Piece) -> bool {
        pc.kind == self.kind
            && self.file.is_none_or(|f| f == from.col())
            && self.rank.is_none_or(|r| r == from.row())
    }
}

#[cfg(test)]
#[path = "san_tests.rs"]
mod san_tests;
