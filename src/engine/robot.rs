use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ai::{self, OpeningStore, SearchLimits};
use super::session::GameSession;
use crate::game::{square_name, Move};

/// The computer-controlled side: book continuation when the position is
/// still in the opening window, minimax search otherwise, and a uniform
/// random pick over the legal list when neither produces a move.
#[derive(Debug)]
pub struct Robot {
    limits: SearchLimits,
    rng: StdRng,
}

impl Robot {
    pub fn new(limits: SearchLimits) -> Self {
        Self::seeded(limits, rand::thread_rng().gen())
    }

    /// Deterministic fallback choices for tests.
    pub fn seeded(limits: SearchLimits, seed: u64) -> Self {
        Self {
            limits,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Attempt the human move; on success, and if the game is not over,
    /// compute and apply the reply. Returns whether the human move was
    /// accepted.
    pub fn user_move(
        &mut self,
        session: &mut GameSession,
        store: Option<&dyn OpeningStore>,
        mv: Move,
    ) -> bool {
        if !session.attempt_move(mv) {
            return false;
        }
        if session.is_game_over() {
            return true;
        }
        if let Some(reply) = self.pick_move(session, store) {
            session.attempt_move(reply);
        }
        true
    }

    /// The reply for the side to move, or `None` only when it has no legal
    /// move at all.
    pub fn pick_move(
        &mut self,
        session: &mut GameSession,
        store: Option<&dyn OpeningStore>,
    ) -> Option<Move> {
        if let Some(store) = store {
            if let Some(mv) = ai::book_move(session, store) {
                return Some(mv);
            }
        }
        let outcome = ai::search_best_move(session, self.limits);
        if let Some(mv) = outcome.best_move {
            tracing::debug!(
                from = %square_name(mv.from),
                to = %square_name(mv.to),
                score = outcome.score,
                "robot plays search move"
            );
            return Some(mv);
        }
        self.random_move(session)
    }

    /// Index-based uniform selection over the materialized legal list.
    fn random_move(&mut self, session: &GameSession) -> Option<Move> {
        let moves = session.legal_moves();
        if moves.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..moves.len());
        Some(moves[index])
    }
}

impl Default for Robot {
    fn default() -> Self {
        Self::new(SearchLimits::default())
    }
}
