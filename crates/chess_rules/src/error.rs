//! Error types for the rule engine
//!
//! An illegal chess move is not an error: the engine answers it with `None`.
//! These variants report inputs that no legal game can produce, which means
//! the caller handed the engine something broken.

use thiserror::Error;

use crate::types::{Color, PieceKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// Coordinates outside the 8x8 grid
    #[error("Square ({row}, {col}) is off the board")]
    OffBoard { row: i8, col: i8 },

    /// Text that is not an algebraic square such as `e4`
    #[error("Invalid square coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// The board has no king of the colour the engine needs to inspect
    #[error("No {0} king on the board")]
    MissingKing(Color),

    /// A pawn was asked to promote into something other than N, B, R or Q
    #[error("Cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// Malformed FEN text
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}

/// Result type alias for rule engine operations
pub type RuleResult<T> = Result<T, RuleError>;
