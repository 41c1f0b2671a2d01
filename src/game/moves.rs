use super::types::{Piece, PieceKind, Square};

/// A move is a value, not an action; applying it is a separate operation.
/// Castling is recognized as the king's two-file move and en passant as a
/// pawn's diagonal move onto an empty square, so neither needs a flag here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

/// Everything needed to reverse one applied move: the moved piece as it
/// stood before the move (kind before promotion, prior `moved` flag), the
/// captured piece together with the square it was removed from (which
/// differs from `to` for en passant), and the castle rook relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub moved: Piece,
    pub captured: Option<(Square, Piece)>,
    pub castle_rook: Option<(Square, Square, Piece)>,
}
