use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    board::Board,
    chess_move::Move,
    error::{RuleError, RuleResult},
    rules::{self, PositionView},
    types::*,
};

/// Which castling moves are still available. Rights only ever go from true
/// to false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const fn all() -> Self {
        Self {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    pub fn get(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side,
            (Color::Black, CastleSide::KingSide) => self.black_king_side,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        match (color, side) {
            (Color::White, CastleSide::KingSide) => self.white_king_side = false,
            (Color::White, CastleSide::QueenSide) => self.white_queen_side = false,
            (Color::Black, CastleSide::KingSide) => self.black_king_side = false,
            (Color::Black, CastleSide::QueenSide) => self.black_queen_side = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::KingSide);
        self.revoke(color, CastleSide::QueenSide);
    }

    /// Revokes the right tied to a rook corner, if `sq` is one.
    fn revoke_corner(&mut self, sq: Square) {
        for color in [Color::White, Color::Black] {
            for side in [CastleSide::KingSide, CastleSide::QueenSide] {
                if sq == Square::at(color.home_row(), side.rook_col()) {
                    self.revoke(color, side);
                }
            }
        }
    }

    /// FEN castling field (`KQkq`, `-` when empty).
    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(4);
        for (on, ch) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if on {
                out.push(ch);
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    pub fn from_fen(field: &str) -> RuleResult<Self> {
        let mut rights = CastlingRights::none();
        if field == "-" {
            return Ok(rights);
        }
        for ch in field.chars() {
            match ch {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => {
                    return Err(RuleError::InvalidFen(format!(
                        "bad castling field {field:?}"
                    )));
                }
            }
        }
        Ok(rights)
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::all()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub elo: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, elo: u32) -> Self {
        Self {
            name: name.into(),
            elo,
        }
    }
}

/// A non-standard starting position the game was set up from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPosition {
    pub board: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl SetupPosition {
    pub fn standard() -> Self {
        Self {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
        }
    }

    pub fn to_fen(&self) -> String {
        fen_string(
            &self.board,
            self.side_to_move,
            &self.castling_rights,
            self.en_passant_target,
        )
    }
}

/// The authoritative state of one game.
///
/// Fields are read through accessors. Once play starts, [`GameState::make_move`]
/// is the only thing that changes them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    move_history: Vec<Move>,
    white_player: Player,
    black_player: Player,
    white_can_offer_draw: bool,
    black_can_offer_draw: bool,
    setup: Option<SetupPosition>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard initial position, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::startpos(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            move_history: Vec::new(),
            white_player: Player::new("White", 0),
            black_player: Player::new("Black", 0),
            white_can_offer_draw: true,
            black_can_offer_draw: true,
            setup: None,
        }
    }

    /// Starts a game from an arbitrary board. All castling rights are granted;
    /// the engine still requires king and rook on their original squares.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self::from_setup(SetupPosition {
            board,
            side_to_move,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
        })
    }

    /// Starts a game from `setup`. The standard position is recognised and
    /// not recorded as a setup.
    pub fn from_setup(setup: SetupPosition) -> Self {
        Self {
            board: setup.board.clone(),
            side_to_move: setup.side_to_move,
            castling_rights: setup.castling_rights,
            en_passant_target: setup.en_passant_target,
            setup: (setup != SetupPosition::standard()).then_some(setup),
            ..Self::new()
        }
    }

    /// Parses a FEN record. The halfmove and fullmove clocks are optional and
    /// ignored.
    pub fn from_fen(text: &str) -> RuleResult<Self> {
        let fields: Vec<&str> = text.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(RuleError::InvalidFen(format!(
                "expected 4 to 6 fields, found {}",
                fields.len()
            )));
        }

        let board = Board::from_fen_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(RuleError::InvalidFen(format!("bad side to move {other:?}")));
            }
        };
        let castling_rights = CastlingRights::from_fen(fields[2])?;
        let en_passant_target = match fields[3] {
            "-" => None,
            sq => {
                let target = sq
                    .parse::<Square>()
                    .map_err(|_| RuleError::InvalidFen(format!("bad en passant square {sq:?}")))?;
                if target.row() != side_to_move.en_passant_target_row() {
                    return Err(RuleError::InvalidFen(format!(
                        "en passant square {sq} is unreachable with {side_to_move} to move"
                    )));
                }
                Some(target)
            }
        };

        Ok(Self::from_setup(SetupPosition {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
        }))
    }

    pub fn to_fen(&self) -> String {
        fen_string(
            &self.board,
            self.side_to_move,
            &self.castling_rights,
            self.en_passant_target,
        )
    }

    pub fn set_players(&mut self, white: Player, black: Player) {
        self.white_player = white;
        self.black_player = black;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn move_history(&self) -> &[Move] {
        &self.move_history
    }

    pub fn white_player(&self) -> &Player {
        &self.white_player
    }

    pub fn black_player(&self) -> &Player {
        &self.black_player
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white_player,
            Color::Black => &self.black_player,
        }
    }

    /// The position play started from, if it was not the standard one.
    pub fn setup(&self) -> Option<&SetupPosition> {
        self.setup.as_ref()
    }

    /// Board and side to move before the first recorded move.
    pub fn start_position(&self) -> (Board, Color) {
        match &self.setup {
            Some(setup) => (setup.board.clone(), setup.side_to_move),
            None => (Board::startpos(), Color::White),
        }
    }

    /// Applies a move previously returned by the rule engine for this state.
    pub fn make_move(&mut self, mv: Move) {
        let color = mv.piece_moved().color;
        self.en_passant_target = None;

        if mv.piece_moved().kind == PieceKind::King {
            self.castling_rights.revoke_all(color);
        }
        // A rook leaving its corner, or being captured on it
        self.castling_rights.revoke_corner(mv.from());
        if mv.is_capture() && !mv.is_en_passant() {
            self.castling_rights.revoke_corner(mv.to());
        }

        self.board.apply_move(&mv);
        self.en_passant_target = mv.skipped_square();
        self.move_history.push(mv);
        self.side_to_move = self.side_to_move.other();

        match self.side_to_move {
            Color::White => self.white_can_offer_draw = true,
            Color::Black => self.black_can_offer_draw = true,
        }

        debug!(
            mv = %mv.to_coordinate(),
            ply = self.move_history.len(),
            fen = %self.to_fen(),
            "move applied"
        );
    }

    /// Validates a coordinate move against this state and plays it.
    /// `Ok(None)` leaves the state untouched.
    pub fn play(&mut self, from: Square, to: Square) -> RuleResult<Option<Move>> {
        self.play_with_promotion(from, to, PieceKind::Queen)
    }

    pub fn play_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        promotion: PieceKind,
    ) -> RuleResult<Option<Move>> {
        let mv = rules::generate_move_with_promotion(&*self, from, to, promotion)?;
        if let Some(mv) = mv {
            self.make_move(mv);
        }
        Ok(mv)
    }

    pub fn can_current_player_offer_draw(&self) -> bool {
        match self.side_to_move {
            Color::White => self.white_can_offer_draw,
            Color::Black => self.black_can_offer_draw,
        }
    }

    /// The side to move offered a draw and the opponent declined. That side
    /// may not offer again until its next turn.
    pub fn record_draw_offer_rejection(&mut self) {
        match self.side_to_move {
            Color::White => self.white_can_offer_draw = false,
            Color::Black => self.black_can_offer_draw = false,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

impl PositionView for GameState {
    fn board(&self) -> &Board {
        &self.board
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
}

/// A detached board plus side to move, for what-if questions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationState {
    pub board: Board,
    pub side_to_move: Color,
    pub en_passant_target: Option<Square>,
}

impl SimulationState {
    pub fn new(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            en_passant_target: None,
        }
    }

    pub fn with_en_passant_target(mut self, sq: Square) -> Self {
        self.en_passant_target = Some(sq);
        self
    }
}

impl PositionView for SimulationState {
    fn board(&self) -> &Board {
        &self.board
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }
}

fn fen_string(
    board: &Board,
    side: Color,
    rights: &CastlingRights,
    ep: Option<Square>,
) -> String {
    let side = match side {
        Color::White => 'w',
        Color::Black => 'b',
    };
    let ep = ep.map_or_else(|| "-".to_string(), |sq| sq.to_string());
    format!(
        "{} {} {} {} 0 1",
        board.fen_placement(),
        side,
        rights.to_fen(),
        ep
    )
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
