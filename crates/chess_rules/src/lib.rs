pub mod board;
pub mod chess_move;
pub mod error;
pub mod game;
pub mod geometry;
pub mod perft;
pub mod pgn;
pub mod rules;
pub mod san;
pub mod types;

// Re-export the public surface so callers can `use chess_rules::*`
pub use board::Board;
pub use chess_move::Move;
pub use error::{RuleError, RuleResult};
pub use game::{CastlingRights, GameState, Player, SetupPosition, SimulationState};
pub use perft::{divide, perft};
pub use pgn::{GameResult, PgnError, PgnHeaders, read_pgn, write_pgn};
pub use rules::{
    PositionView, generate_move, generate_move_with_promotion, has_legal_move, is_checkmate,
    is_king_in_check, is_square_attacked, is_stalemate, legal_moves, valid_moves_for_piece,
};
pub use san::{SanError, SanWriter, move_to_san, parse_san};
pub use types::*;
