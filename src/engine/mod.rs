//! The stateful engine surface: the game session (controller), the AI
//! stack and the computer opponent built on top of it.

pub mod ai;
pub mod robot;
pub mod session;

pub use ai::{
    book_move, search_best_move, spawn_search, AsyncSearch, BookError, MemoryOpeningStore,
    OpeningStore, SearchLimits, SearchOutcome, BOOK_PLY_LIMIT,
};
pub use robot::Robot;
pub use session::{GameSession, Outcome};

#[cfg(test)]
mod tests;
