//! The rules core: board state, per-kind move patterns, attack probes and
//! the board-level apply/revert primitive. Everything here is pure with
//! respect to game flow; turn history, capture accounting and undo/redo
//! live in `engine`.

mod apply;
mod attacks;
mod movegen;
mod moves;
mod position;
mod setup;
mod types;

pub(crate) use apply::{apply_on_board, revert_on_board};
pub use attacks::{is_in_check, square_attacked_by};
pub use movegen::{piece_moves, side_moves};
pub use moves::{Move, MoveRecord};
pub use position::Position;
pub use setup::{standard_position, STANDARD_BACK_RANK};
pub use types::{
    file_of, parse_coordinate_move, parse_square, rank_of, square, square_name, Color, Piece,
    PieceKind, Square, BOARD_SQUARES,
};
