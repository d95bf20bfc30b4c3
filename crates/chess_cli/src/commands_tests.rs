use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn moves(list: &[&str]) -> Vec<String> {
    list.iter().map(|m| m.to_string()).collect()
}

#[test]
fn test_parse_coordinate() {
    let mv = parse_coordinate("e2e4").unwrap();
    assert_eq!((mv.from, mv.to, mv.promotion), (sq("e2"), sq("e4"), PieceKind::Queen));

    let mv = parse_coordinate("e7e8n").unwrap();
    assert_eq!(mv.promotion, PieceKind::Knight);

    for bad in ["", "e2", "e2e9", "e7e8k", "e2-e4", "é2e4"] {
        assert!(parse_coordinate(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn test_play_and_render_pgn() {
    let config = CliConfig::from_toml("[white]\nname = \"Ada\"\n").unwrap();
    let state = play(&config, None, &moves(&["f2f3", "e7e5", "g2g4", "d8h4"])).unwrap();
    let out = render(&config, &state, false).unwrap();
    assert!(out.contains("[White \"Ada\"]"));
    assert!(out.contains("1. f3 e5 2. g4 Qh4# 0-1"));
    assert!(out.ends_with("Checkmate, black wins (0-1)"));
}

#[test]
fn test_play_rejects_illegal_move() {
    let err = play(&CliConfig::default(), None, &moves(&["e2e4", "e2e4"])).unwrap_err();
    assert!(err.to_string().contains("move 2 (e2e4) is illegal"));
}

#[test]
fn test_play_from_fen_with_promotion() {
    let state = play(
        &CliConfig::default(),
        Some("4k3/P7/8/8/8/8/8/4K3 w - -"),
        &moves(&["a7a8r"]),
    )
    .unwrap();
    assert_eq!(status_line(&state).unwrap(), "black to move, in check");
}

#[test]
fn test_render_json_snapshot() {
    let config = CliConfig::default();
    let state = play(&config, None, &moves(&["e2e4"])).unwrap();
    let out = render(&config, &state, true).unwrap();
    assert_eq!(GameState::from_json(&out).unwrap(), state);
}

#[test]
fn test_hints() {
    assert_eq!(hints(None, "g1").unwrap(), vec![sq("f3"), sq("h3")]);
    assert!(hints(None, "e7").unwrap().is_empty());
    assert!(hints(None, "z9").is_err());
    assert!(hints(Some("not a fen"), "e2").is_err());
}

#[test]
fn test_replay_missing_file() {
    let err = replay(&CliConfig::default(), Path::new("/nonexistent/game.pgn")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/game.pgn"));
}
