use clap::CommandFactory;

use super::*;

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_every_argument_has_help() {
    let cli = Cli::command();
    for sub in cli.get_subcommands() {
        for arg in sub.get_arguments() {
            assert!(
                arg.get_help().is_some(),
                "{} {} has no help text",
                sub.get_name(),
                arg.get_id()
            );
        }
    }
}

#[test]
fn test_parse_replay() {
    let cli = Cli::try_parse_from(["chess-cli", "replay", "--json", "game.pgn"]).unwrap();
    match cli.command {
        Command::Replay {
            config,
            json,
            pgn_file,
        } => {
            assert_eq!(config, None);
            assert!(json);
            assert_eq!(pgn_file, PathBuf::from("game.pgn"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}
