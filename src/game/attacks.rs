use super::position::Position;
use super::types::{offset, Color, PieceKind, Square};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Whether any piece of `by` can reach `target`. Probes outward from the
/// target along each movement pattern instead of scanning every origin, so
/// the cost is bounded by ray length rather than piece count.
pub fn square_attacked_by(position: &Position, target: Square, by: Color) -> bool {
    for (file_delta, rank_delta) in KNIGHT_OFFSETS {
        if occupant_is(position, target, file_delta, rank_delta, by, PieceKind::Knight) {
            return true;
        }
    }

    for (file_delta, rank_delta) in KING_OFFSETS {
        if occupant_is(position, target, file_delta, rank_delta, by, PieceKind::King) {
            return true;
        }
    }

    // A pawn attacks diagonally forward, so the attacker sits one rank
    // behind the target relative to its own advance direction.
    let pawn_rank_delta = -by.pawn_step();
    for file_delta in [-1_i8, 1_i8] {
        if occupant_is(position, target, file_delta, pawn_rank_delta, by, PieceKind::Pawn) {
            return true;
        }
    }

    for (file_step, rank_step) in BISHOP_DIRECTIONS {
        if ray_hits(position, target, file_step, rank_step, by, PieceKind::Bishop) {
            return true;
        }
    }

    for (file_step, rank_step) in ROOK_DIRECTIONS {
        if ray_hits(position, target, file_step, rank_step, by, PieceKind::Rook) {
            return true;
        }
    }

    false
}

pub fn is_in_check(position: &Position, color: Color) -> bool {
    let Some(king_square) = position.king_square(color) else {
        return false;
    };
    square_attacked_by(position, king_square, color.opposite())
}

fn occupant_is(
    position: &Position,
    target: Square,
    file_delta: i8,
    rank_delta: i8,
    color: Color,
    kind: PieceKind,
) -> bool {
    offset(target, file_delta, rank_delta)
        .and_then(|sq| position.piece_at(sq))
        .is_some_and(|piece| piece.color == color && piece.kind == kind)
}

/// Walk one ray from `target`; the first occupied square decides. `slider`
/// is the non-queen kind that moves along this ray (queens match either).
fn ray_hits(
    position: &Position,
    target: Square,
    file_step: i8,
    rank_step: i8,
    color: Color,
    slider: PieceKind,
) -> bool {
    let mut current = target;
    while let Some(next) = offset(current, file_step, rank_step) {
        if let Some(piece) = position.piece_at(next) {
            return piece.color == color
                && (piece.kind == slider || piece.kind == PieceKind::Queen);
        }
        current = next;
    }
    false
}
