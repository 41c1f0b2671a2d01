use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::session::GameSession;
use crate::game::{parse_coordinate_move, Move};

/// The oracle stops consulting the book once this many plies have been
/// played (ten full moves per side, matching the window the recorded
/// games were truncated to).
pub const BOOK_PLY_LIMIT: usize = 20;

/// The opening book's backing store, an external collaborator. Keyed by
/// the board-only placement signature; returns the statistically most
/// common recorded continuation in coordinate notation, ties resolved by
/// whatever stable order the store keeps.
pub trait OpeningStore {
    fn most_common_continuation(&self, signature: &str) -> Option<String>;
}

#[derive(Debug, Error)]
pub enum BookError {
    #[error("failed to read opening book: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed opening book: {0}")]
    Format(#[from] serde_json::Error),
}

/// In-memory store: every recorded (signature, continuation) row, queried
/// by frequency with first-recorded-wins tie breaking. Loadable from a
/// JSON object mapping signatures to continuation lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryOpeningStore {
    games: HashMap<String, Vec<String>>,
}

impl MemoryOpeningStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, signature: &str, continuation: &str) {
        self.games
            .entry(signature.to_string())
            .or_default()
            .push(continuation.to_string());
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self, BookError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, BookError> {
        Self::from_json_reader(File::open(path)?)
    }
}

impl OpeningStore for MemoryOpeningStore {
    fn most_common_continuation(&self, signature: &str) -> Option<String> {
        let rows = self.games.get(signature)?;
        let mut tally: Vec<(&str, u32)> = Vec::new();
        for row in rows {
            match tally.iter_mut().find(|(mv, _)| *mv == row.as_str()) {
                Some((_, count)) => *count += 1,
                None => tally.push((row.as_str(), 1)),
            }
        }
        // Strict comparison keeps the earliest-recorded move on ties.
        let mut best: Option<(&str, u32)> = None;
        for (mv, count) in tally {
            let improves = match best {
                Some((_, best_count)) => count > best_count,
                None => true,
            };
            if improves {
                best = Some((mv, count));
            }
        }
        best.map(|(mv, _)| mv.to_string())
    }
}

/// Look up the recorded continuation for the current position. `None` on a
/// store miss, past the book window, or when the stored move does not
/// parse or is not legal here — every miss falls through to the search.
pub fn book_move(session: &GameSession, store: &dyn OpeningStore) -> Option<Move> {
    if session.move_log().len() >= BOOK_PLY_LIMIT {
        return None;
    }
    let signature = session.position().placement_signature();
    let Some(raw) = store.most_common_continuation(&signature) else {
        tracing::debug!(%signature, "no book continuation");
        return None;
    };
    let (from, to, promotion) = parse_coordinate_move(&raw)?;
    let candidate = session
        .legal_moves()
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion);
    match candidate {
        Some(mv) => {
            tracing::debug!(%signature, continuation = %raw, "book hit");
            Some(mv)
        }
        None => {
            tracing::debug!(%signature, continuation = %raw, "book move not legal here");
            None
        }
    }
}
