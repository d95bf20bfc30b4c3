//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_rules -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 3 over the standard suite
//!   cargo flamegraph --example perft_bench -p chess_rules
//!
//!   # Custom depth and position (Kiwipete - complex middlegame)
//!   cargo flamegraph --example perft_bench -p chess_rules -- 3 "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -"
//!
//! Pass `divide` as the third argument to print the per-move breakdown of a
//! single position.

use chess_rules::{GameState, RuleError, divide, perft};
use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Standard test positions for comprehensive profiling
const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
    (
        "Position 6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    // If FEN provided, use single position mode
    let result = match args.get(2) {
        Some(fen) if args.get(3).is_some_and(|a| a == "divide") => run_divide(fen, depth),
        Some(fen) => run_single_position(fen, depth),
        None => run_all_positions(depth),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(fen: &str, depth: u8) -> Result<(), RuleError> {
    let state = GameState::from_fen(fen)?;

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        perft(&state, depth.saturating_sub(2))?;
    }

    let start = Instant::now();
    let nodes = perft(&state, depth)?;
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
    Ok(())
}

fn run_divide(fen: &str, depth: u8) -> Result<(), RuleError> {
    let state = GameState::from_fen(fen)?;
    let split = divide(&state, depth)?;
    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    println!();
    println!("Moves: {}", split.len());
    println!("Nodes: {}", split.iter().map(|(_, n)| n).sum::<u64>());
    Ok(())
}

fn run_all_positions(depth: u8) -> Result<(), RuleError> {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let state = GameState::from_fen(fen)?;

        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&state, depth)?;
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}
