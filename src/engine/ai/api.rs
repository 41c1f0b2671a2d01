use crate::game::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub depth: u8,
}

impl SearchLimits {
    pub const fn new(depth: u8) -> Self {
        Self { depth }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        // Full-width depth 4 is the fixed reference strength; it is slow
        // enough that interactive callers should run the search off the
        // interaction thread (see `ai::worker`).
        Self::new(4)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best_move: Option<Move>,
    pub nodes: u64,
}
