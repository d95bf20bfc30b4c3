use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chess_rules::{
    GameResult, GameState, PieceKind, Square, is_king_in_check, read_pgn, valid_moves_for_piece,
    write_pgn,
};
use tracing::info;

use crate::config::CliConfig;

/// A move in coordinate notation: `e2e4`, or `e7e8n` with a promotion piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: PieceKind,
}

pub fn parse_coordinate(text: &str) -> Result<CoordinateMove> {
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        bail!("expected a move like e2e4 or e7e8q, got {text:?}");
    }
    let from = text[0..2].parse::<Square>()?;
    let to = text[2..4].parse::<Square>()?;
    let promotion = match text[4..].chars().next() {
        None | Some('q') => PieceKind::Queen,
        Some('r') => PieceKind::Rook,
        Some('b') => PieceKind::Bishop,
        Some('n') => PieceKind::Knight,
        Some(other) => bail!("unknown promotion piece {other:?} in {text:?}"),
    };
    Ok(CoordinateMove {
        from,
        to,
        promotion,
    })
}

/// One-line description of where the game stands.
pub fn status_line(state: &GameState) -> Result<String> {
    let side = state.side_to_move();
    let line = match GameResult::of(state)? {
        GameResult::WhiteWins => "Checkmate, white wins (1-0)".to_string(),
        GameResult::BlackWins => "Checkmate, black wins (0-1)".to_string(),
        GameResult::Draw => "Stalemate (1/2-1/2)".to_string(),
        GameResult::Ongoing if is_king_in_check(state, side)? => format!("{side} to move, in check"),
        GameResult::Ongoing => format!("{side} to move"),
    };
    Ok(line)
}

/// Plays coordinate moves from `fen` (or the initial position).
pub fn play(config: &CliConfig, fen: Option<&str>, moves: &[String]) -> Result<GameState> {
    let mut state = match fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new(),
    };
    let (white, black) = config.players();
    state.set_players(white, black);

    for (i, text) in moves.iter().enumerate() {
        let mv = parse_coordinate(text).with_context(|| format!("move {}", i + 1))?;
        if state
            .play_with_promotion(mv.from, mv.to, mv.promotion)?
            .is_none()
        {
            bail!("move {} ({text}) is illegal in {}", i + 1, state.to_fen());
        }
    }
    info!(plies = moves.len(), "moves played");
    Ok(state)
}

pub fn replay(config: &CliConfig, path: &Path) -> Result<GameState> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut state = read_pgn(&text).with_context(|| format!("importing {}", path.display()))?;
    if config.has_players() {
        let (white, black) = config.players();
        state.set_players(white, black);
    }
    Ok(state)
}

/// Renders a finished command: the JSON snapshot, or PGN plus status.
pub fn render(config: &CliConfig, state: &GameState, json: bool) -> Result<String> {
    if json {
        return Ok(state.to_json()?);
    }
    let mut out = write_pgn(state, &config.headers())?;
    out.push('\n');
    out.push_str(&status_line(state)?);
    Ok(out)
}

/// Destination squares of the piece on `square`, in board order.
pub fn hints(fen: Option<&str>, square: &str) -> Result<Vec<Square>> {
    let state = match fen {
        Some(fen) => GameState::from_fen(fen)?,
        None => GameState::new(),
    };
    let sq = square.parse::<Square>()?;
    Ok(valid_moves_for_piece(&state, sq)?.into_iter().collect())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
