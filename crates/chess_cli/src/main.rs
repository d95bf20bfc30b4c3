//! chess-cli: play, replay and inspect games with the chess rule engine.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "chess-cli", version, about = "Two-player chess rule engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play coordinate moves (e2e4, e7e8n) and print the game
    Play {
        /// TOML file with event and player details
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the JSON snapshot instead of PGN
        #[arg(long)]
        json: bool,
        /// Start from this position instead of the initial one
        #[arg(long)]
        fen: Option<String>,
        /// Moves in coordinate notation, in playing order
        moves: Vec<String>,
    },
    /// Import a PGN file and print it back with the final status
    Replay {
        /// TOML file with event and player details
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the JSON snapshot instead of PGN
        #[arg(long)]
        json: bool,
        /// PGN file to import; only its first game is read
        pgn_file: PathBuf,
    },
    /// List the legal destinations of the piece on a square
    Hints {
        /// Position to inspect instead of the initial one
        #[arg(long)]
        fen: Option<String>,
        /// Square of the piece, such as g1
        square: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Play {
            config,
            json,
            fen,
            moves,
        } => {
            let config = CliConfig::load(config.as_deref())?;
            let state = commands::play(&config, fen.as_deref(), &moves)?;
            println!("{}", commands::render(&config, &state, json)?);
        }
        Command::Replay {
            config,
            json,
            pgn_file,
        } => {
            let config = CliConfig::load(config.as_deref())?;
            let state = commands::replay(&config, &pgn_file)?;
            println!("{}", commands::render(&config, &state, json)?);
        }
        Command::Hints { fen, square } => {
            let targets = commands::hints(fen.as_deref(), &square)?;
            let line: Vec<String> = targets.iter().map(ToString::to_string).collect();
            println!("{}", line.join(" "));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod main_tests;
