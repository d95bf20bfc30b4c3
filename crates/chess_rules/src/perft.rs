use crate::{error::RuleResult, game::GameState, rules, types::PieceKind};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, with
/// each promotion counted once per piece.
pub fn perft(state: &GameState, depth: u8) -> RuleResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = rules::legal_candidates_for_side(state, &PieceKind::PROMOTIONS)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut next = state.clone();
        next.make_move(mv);
        nodes += perft(&next, depth - 1)?;
    }
    Ok(nodes)
}

/// Per-move breakdown of [`perft`], in move generation order.
pub fn divide(state: &GameState, depth: u8) -> RuleResult<Vec<(String, u64)>> {
    let moves = rules::legal_candidates_for_side(state, &PieceKind::PROMOTIONS)?;
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        let mut next = state.clone();
        next.make_move(mv);
        out.push((mv.to_coordinate(), perft(&next, depth.saturating_sub(1))?));
    }
    Ok(out)
}
