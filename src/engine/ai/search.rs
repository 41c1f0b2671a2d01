use super::api::{SearchLimits, SearchOutcome};
use super::eval;
use crate::engine::session::GameSession;
use crate::game::{Color, Move};

pub(crate) const SCORE_INF: i32 = 32_000;

/// Depth-bounded minimax with alpha-beta pruning for the side to move.
/// Each candidate is applied to the one shared session, searched, and
/// reverted; the session is bit-for-bit unchanged when this returns.
pub fn search_best_move(session: &mut GameSession, limits: SearchLimits) -> SearchOutcome {
    let engine_side = session.position().side_to_move();
    let depth = limits.depth.max(1);
    let mut nodes = 0_u64;
    let (score, best_move) = minimax(
        session,
        engine_side,
        depth,
        -SCORE_INF,
        SCORE_INF,
        true,
        &mut nodes,
    );
    tracing::debug!(depth, nodes, score, "search finished");
    SearchOutcome {
        score,
        best_move,
        nodes,
    }
}

/// Pruning never changes the returned score, only the node count; and the
/// strict comparisons mean the FIRST move reaching the best score in
/// generation order is the one retained.
fn minimax(
    session: &mut GameSession,
    engine_side: Color,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> (i32, Option<Move>) {
    *nodes += 1;
    if depth == 0 {
        return (eval::captured_differential(session, engine_side), None);
    }
    let moves = session.legal_moves();
    if moves.is_empty() {
        return (eval::captured_differential(session, engine_side), None);
    }

    let mut best_move = None;
    if maximizing {
        let mut best_score = -SCORE_INF;
        for mv in moves {
            if !session.push_move(mv) {
                continue;
            }
            let (score, _) = minimax(session, engine_side, depth - 1, alpha, beta, false, nodes);
            session.pop_move();
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if beta <= alpha {
                break;
            }
        }
        (best_score, best_move)
    } else {
        let mut best_score = SCORE_INF;
        for mv in moves {
            if !session.push_move(mv) {
                continue;
            }
            let (score, _) = minimax(session, engine_side, depth - 1, alpha, beta, true, nodes);
            session.pop_move();
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score < beta {
                beta = score;
            }
            if beta <= alpha {
                break;
            }
        }
        (best_score, best_move)
    }
}
