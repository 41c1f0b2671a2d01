use super::moves::{Move, MoveRecord};
use super::position::Position;
use super::types::{file_of, rank_of, square, Color, Piece, PieceKind, Square};

/// Perform `mv` on the board and return the metadata needed to reverse it,
/// or `None` (board untouched) when the move is not mechanically sound for
/// the side to move. Membership in the generated move set is the session's
/// responsibility; this layer still rejects anything it cannot reverse
/// cleanly so malformed input never corrupts the grid.
pub(crate) fn apply_on_board(position: &mut Position, mv: Move, log: &[Move]) -> Option<MoveRecord> {
    if mv.from as usize >= 64 || mv.to as usize >= 64 || mv.from == mv.to {
        return None;
    }

    let side_to_move = position.side_to_move();
    let moved = position.piece_at(mv.from)?;
    if moved.color != side_to_move {
        return None;
    }

    let mut final_kind = moved.kind;
    if let Some(promoted) = mv.promotion {
        if moved.kind != PieceKind::Pawn
            || matches!(promoted, PieceKind::King | PieceKind::Pawn)
            || rank_of(mv.to) != side_to_move.promotion_rank()
        {
            return None;
        }
        final_kind = promoted;
    } else if moved.kind == PieceKind::Pawn && rank_of(mv.to) == side_to_move.promotion_rank() {
        return None;
    }

    if moved.kind == PieceKind::King && file_delta(mv) == 2 {
        return apply_castle(position, mv, moved);
    }

    let captured = capture_for(position, mv, moved, side_to_move, log)?;

    position.set_piece(mv.from, None);
    if let Some((capture_square, _)) = captured {
        position.set_piece(capture_square, None);
    }
    position.set_piece(
        mv.to,
        Some(Piece {
            color: side_to_move,
            kind: final_kind,
            moved: true,
        }),
    );
    position.set_side_to_move(side_to_move.opposite());

    Some(MoveRecord {
        mv,
        moved,
        captured,
        castle_rook: None,
    })
}

/// Put the board back exactly as it stood before `record` was applied:
/// piece locations, the captured piece (en passant included), promotion,
/// the castle rook, and every `moved` flag.
pub(crate) fn revert_on_board(position: &mut Position, record: &MoveRecord) {
    position.set_piece(record.mv.to, None);
    position.set_piece(record.mv.from, Some(record.moved));
    if let Some((rook_from, rook_to, rook)) = record.castle_rook {
        position.set_piece(rook_to, None);
        position.set_piece(rook_from, Some(rook));
    }
    if let Some((capture_square, captured)) = record.captured {
        position.set_piece(capture_square, Some(captured));
    }
    position.set_side_to_move(record.moved.color);
}

/// What `mv` captures, if anything: the occupant of `to`, or for a pawn
/// sliding diagonally onto an empty square, the pawn passed by (en
/// passant). A same-color occupant fails the move.
fn capture_for(
    position: &Position,
    mv: Move,
    moved: Piece,
    side_to_move: Color,
    log: &[Move],
) -> Option<Option<(Square, Piece)>> {
    if let Some(target) = position.piece_at(mv.to) {
        if target.color == side_to_move {
            return None;
        }
        return Some(Some((mv.to, target)));
    }

    let diagonal = moved.kind == PieceKind::Pawn && file_delta(mv) == 1;
    if diagonal {
        let last = log.last()?;
        let passed_square = square(file_of(mv.to), rank_of(mv.from))?;
        if last.to != passed_square {
            return None;
        }
        let passed = position.piece_at(passed_square)?;
        if passed.kind != PieceKind::Pawn || passed.color == side_to_move {
            return None;
        }
        return Some(Some((passed_square, passed)));
    }

    Some(None)
}

fn apply_castle(position: &mut Position, mv: Move, king: Piece) -> Option<MoveRecord> {
    if king.moved || mv.promotion.is_some() || position.piece_at(mv.to).is_some() {
        return None;
    }
    let direction: i8 = if file_of(mv.to) > file_of(mv.from) { 1 } else { -1 };

    // First piece outward from the king must be the castling rook.
    let mut current = mv.from;
    let rook_from = loop {
        current = super::types::offset(current, direction, 0)?;
        match position.piece_at(current) {
            Some(piece) if piece.color == king.color && piece.kind == PieceKind::Rook => {
                break current;
            }
            Some(_) => return None,
            None => {}
        }
    };
    let rook = position.piece_at(rook_from)?;
    if rook.moved {
        return None;
    }
    let rook_to = square((file_of(mv.to) as i8 - direction) as u8, rank_of(mv.from))?;

    position.set_piece(mv.from, None);
    position.set_piece(rook_from, None);
    position.set_piece(
        mv.to,
        Some(Piece {
            color: king.color,
            kind: PieceKind::King,
            moved: true,
        }),
    );
    position.set_piece(
        rook_to,
        Some(Piece {
            color: king.color,
            kind: PieceKind::Rook,
            moved: true,
        }),
    );
    position.set_side_to_move(king.color.opposite());

    Some(MoveRecord {
        mv,
        moved: king,
        captured: None,
        castle_rook: Some((rook_from, rook_to, rook)),
    })
}

fn file_delta(mv: Move) -> u8 {
    (file_of(mv.from) as i8 - file_of(mv.to) as i8).unsigned_abs()
}
