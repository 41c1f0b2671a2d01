//! A chess rules engine with an attached adversarial search: full move
//! generation (castling, en passant, promotion), in-place apply/undo/redo
//! with capture accounting, checkmate/stalemate detection, depth-bounded
//! minimax with alpha-beta pruning, and an opening-book oracle that
//! shortcuts the early game.
//!
//! Rendering, input handling and the opening book's persisted backing
//! store are external collaborators; the crate exposes read-only position
//! queries for the former and the [`engine::OpeningStore`] contract for
//! the latter.

pub mod engine;
pub mod game;

pub use engine::{GameSession, Outcome, Robot, SearchLimits};
pub use game::{Color, Move, Piece, PieceKind, Position, Square};
