//! PGN export and import.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    error::RuleError,
    game::{GameState, Player},
    rules,
    san::{SanError, SanWriter, parse_san},
    types::Color,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("Move {ply} ({token:?}) could not be played: {source}")]
    Move {
        ply: usize,
        token: String,
        #[source]
        source: SanError,
    },

    #[error("Malformed tag pair: {0:?}")]
    InvalidTag(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

/// Tags that describe the event rather than the players.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PgnHeaders {
    pub event: String,
    pub site: String,
    pub date: NaiveDate,
    pub round: String,
}

impl Default for PgnHeaders {
    fn default() -> Self {
        Self {
            event: "Local Game".to_string(),
            site: "Unknown".to_string(),
            date: Local::now().date_naive(),
            round: "?".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    Ongoing,
}

impl GameResult {
    /// Decided by the final position alone: mate or stalemate, else ongoing.
    pub fn of(state: &GameState) -> Result<GameResult, RuleError> {
        if rules::is_checkmate(state)? {
            Ok(match state.side_to_move() {
                Color::White => GameResult::BlackWins,
                Color::Black => GameResult::WhiteWins,
            })
        } else if rules::is_stalemate(state)? {
            Ok(GameResult::Draw)
        } else {
            Ok(GameResult::Ongoing)
        }
    }

    pub fn as_pgn(self) -> &'static str {
        match self {
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Ongoing => "*",
        }
    }
}

pub fn write_pgn(state: &GameState, headers: &PgnHeaders) -> Result<String, PgnError> {
    let result = GameResult::of(state)?.as_pgn();
    let white = state.player(Color::White);
    let black = state.player(Color::Black);

    let mut out = String::new();
    push_tag(&mut out, "Event", &headers.event);
    push_tag(&mut out, "Site", &headers.site);
    push_tag(&mut out, "Date", &headers.date.format("%Y.%m.%d").to_string());
    push_tag(&mut out, "Round", &headers.round);
    push_tag(&mut out, "White", &white.name);
    push_tag(&mut out, "Black", &black.name);
    push_tag(&mut out, "Result", result);
    if white.elo > 0 {
        push_tag(&mut out, "WhiteElo", &white.elo.to_string());
    }
    if black.elo > 0 {
        push_tag(&mut out, "BlackElo", &black.elo.to_string());
    }
    if let Some(setup) = state.setup() {
        push_tag(&mut out, "SetUp", "1");
        push_tag(&mut out, "FEN", &setup.to_fen());
    }
    out.push('\n');

    let (start_board, start_side) = state.start_position();
    let mut writer = SanWriter::from_board(start_board);
    // Plies are counted as if white always moved first
    let offset = usize::from(start_side == Color::Black);
    for (i, mv) in state.move_history().iter().enumerate() {
        let ply = i + offset;
        if ply % 2 == 0 {
            let _ = write!(out, "{}. ", ply / 2 + 1);
        } else if i == 0 {
            let _ = write!(out, "{}... ", ply / 2 + 1);
        }
        out.push_str(&writer.write(mv)?);
        out.push(' ');
    }
    out.push_str(result);
    out.push('\n');

    debug!(plies = state.move_history().len(), result, "pgn written");
    Ok(out)
}

fn push_tag(out: &mut String, name: &str, value: &str) {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    let _ = writeln!(out, "[{name} \"{escaped}\"]");
}

/// Rebuilds a game from PGN text, replaying every move through the rule
/// engine. Only the first game in `text` is read.
pub fn read_pgn(text: &str) -> Result<GameState, PgnError> {
    let mut white = Player::new("White", 0);
    let mut black = Player::new("Black", 0);
    let mut fen = None;
    let mut movetext = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with('[') {
            let (name, value) = parse_tag(line)?;
            match name {
                "White" => white.name = value,
                "Black" => black.name = value,
                "WhiteElo" => white.elo = parse_elo(name, &value),
                "BlackElo" => black.elo = parse_elo(name, &value),
                "FEN" => fen = Some(value),
                _ => {}
            }
        } else {
            movetext.push_str(line);
            movetext.push('\n');
        }
    }

    let mut state = match fen {
        Some(fen) => GameState::from_fen(&fen)?,
        None => GameState::new(),
    };
    state.set_players(white, black);

    for (i, token) in movetext_tokens(&movetext).into_iter().enumerate() {
        let mv = parse_san(&state, &token).map_err(|source| PgnError::Move {
            ply: i + 1,
            token: token.clone(),
            source,
        })?;
        state.make_move(mv);
    }

    info!(
        plies = state.move_history().len(),
        white = %state.white_player().name,
        black = %state.black_player().name,
        "pgn imported"
    );
    Ok(state)
}

/// Unparsable ratings (`?`, `-`) count as unrated.
fn parse_elo(tag: &str, value: &str) -> u32 {
    value.parse().unwrap_or_else(|_| {
        debug!(tag, value, "ignoring malformed rating");
        0
    })
}

fn parse_tag(line: &str) -> Result<(&str, String), PgnError> {
    let invalid = || PgnError::InvalidTag(line.to_string());
    let inner = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(invalid)?;
    let (name, value) = inner.split_once(char::is_whitespace).ok_or_else(invalid)?;
    let value = value
        .trim()
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(invalid)?;
    Ok((name, value.replace("\\\"", "\"").replace("\\\\", "\\")))
}

/// SAN tokens of the main line, without comments, variations, move numbers,
/// annotation glyphs or the result marker.
fn movetext_tokens(movetext: &str) -> Vec<String> {
    strip_comments(movetext)
        .split_whitespace()
        .filter_map(|raw| {
            // `12.`, `12...` and `1.e4` all carry a move number prefix
            let word = match raw.rfind('.') {
                Some(idx) if raw[..idx].chars().all(|c| c.is_ascii_digit() || c == '.') => {
                    &raw[idx + 1..]
                }
                _ => raw,
            };
            let skip = word.is_empty()
                || word.starts_with('$')
                || matches!(word, "1-0" | "0-1" | "1/2-1/2" | "*");
            (!skip).then(|| word.to_string())
        })
        .collect()
}

/// Blanks out `{...}` and `;` comments and `(...)` variations, which may nest.
fn strip_comments(movetext: &str) -> String {
    let mut out = String::with_capacity(movetext.len());
    let mut in_brace = false;
    let mut in_line = false;
    let mut depth = 0usize;
    for ch in movetext.chars() {
        match ch {
            '\n' if in_line => {
                in_line = false;
                out.push(' ');
            }
            _ if in_line => {}
            '}' if in_brace => {
                in_brace = false;
                out.push(' ');
            }
            _ if in_brace => {}
            '{' => in_brace = true,
            ';' => in_line = true,
            '(' => depth += 1,
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    out.push(' ');
                }
            }
            _ if depth > 0 => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
