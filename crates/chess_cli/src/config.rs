//! Optional TOML configuration for the CLI.
//!
//! ```toml
//! [game]
//! event = "Club Night"
//! site = "Riga"
//! round = "3"
//!
//! [white]
//! name = "Ada"
//! elo = 1850
//! ```
//!
//! Every key is optional. A missing file means defaults everywhere.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chess_rules::{PgnHeaders, Player};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub game: GameSection,
    pub white: PlayerSection,
    pub black: PlayerSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub event: String,
    pub site: String,
    pub round: String,
}

impl Default for GameSection {
    fn default() -> Self {
        let headers = PgnHeaders::default();
        Self {
            event: headers.event,
            site: headers.site,
            round: headers.round,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerSection {
    pub name: Option<String>,
    pub elo: u32,
}

impl PlayerSection {
    fn to_player(&self, fallback: &str) -> Player {
        Player::new(self.name.as_deref().unwrap_or(fallback), self.elo)
    }
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn headers(&self) -> PgnHeaders {
        PgnHeaders {
            event: self.game.event.clone(),
            site: self.game.site.clone(),
            round: self.game.round.clone(),
            ..PgnHeaders::default()
        }
    }

    pub fn players(&self) -> (Player, Player) {
        (self.white.to_player("White"), self.black.to_player("Black"))
    }

    /// True when the config names either player.
    pub fn has_players(&self) -> bool {
        self.white.name.is_some() || self.black.name.is_some()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
