use super::attacks::{
    is_in_check, square_attacked_by, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    ROOK_DIRECTIONS,
};
use super::moves::Move;
use super::position::Position;
use super::types::{file_of, offset, rank_of, square, Color, Piece, PieceKind, Square};

/// All pseudo-legal moves for the occupant of `from`, dispatched per piece
/// kind. "Does this leave my own king attacked" is not filtered here; the
/// session layers that on top. The move log is consulted only for en
/// passant (was the immediately preceding move a two-square pawn advance
/// landing laterally adjacent).
pub fn piece_moves(position: &Position, from: Square, log: &[Move]) -> Vec<Move> {
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(position, from, piece, log, &mut moves),
        PieceKind::Knight => leaper_moves(position, from, piece, &KNIGHT_OFFSETS, &mut moves),
        PieceKind::Bishop => slider_moves(position, from, piece, &BISHOP_DIRECTIONS, &mut moves),
        PieceKind::Rook => slider_moves(position, from, piece, &ROOK_DIRECTIONS, &mut moves),
        PieceKind::Queen => {
            slider_moves(position, from, piece, &BISHOP_DIRECTIONS, &mut moves);
            slider_moves(position, from, piece, &ROOK_DIRECTIONS, &mut moves);
        }
        PieceKind::King => {
            leaper_moves(position, from, piece, &KING_OFFSETS, &mut moves);
            castling_moves(position, from, piece, &mut moves);
        }
    }
    moves
}

/// Union of `piece_moves` over every piece of the side to move, scanning
/// squares a1 upward. Callers rely on this order being stable.
pub fn side_moves(position: &Position, log: &[Move]) -> Vec<Move> {
    let side = position.side_to_move();
    let mut moves = Vec::with_capacity(64);
    for from in position.squares_of(side) {
        moves.extend(piece_moves(position, from, log));
    }
    moves
}

fn leaper_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    deltas: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(file_delta, rank_delta) in deltas {
        let Some(to) = offset(from, file_delta, rank_delta) else {
            continue;
        };
        if let Some(target) = position.piece_at(to) {
            if target.color == piece.color {
                continue;
            }
        }
        moves.push(Move::new(from, to));
    }
}

fn slider_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(file_step, rank_step) in directions {
        let mut current = from;
        while let Some(to) = offset(current, file_step, rank_step) {
            match position.piece_at(to) {
                Some(target) => {
                    if target.color != piece.color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
                None => {
                    moves.push(Move::new(from, to));
                    current = to;
                }
            }
        }
    }
}

fn pawn_moves(
    position: &Position,
    from: Square,
    piece: Piece,
    log: &[Move],
    moves: &mut Vec<Move>,
) {
    let color = piece.color;
    let step = color.pawn_step();
    let promotion_rank = color.promotion_rank();

    if let Some(one_step) = offset(from, 0, step) {
        if position.piece_at(one_step).is_none() {
            push_pawn_move(moves, from, one_step, promotion_rank);
            let double_eligible = !piece.moved && rank_of(from) == color.pawn_start_rank();
            if double_eligible {
                if let Some(two_step) = offset(from, 0, step * 2) {
                    if position.piece_at(two_step).is_none() {
                        moves.push(Move::new(from, two_step));
                    }
                }
            }
        }
    }

    for file_delta in [-1_i8, 1_i8] {
        let Some(target) = offset(from, file_delta, step) else {
            continue;
        };
        match position.piece_at(target) {
            Some(victim) => {
                if victim.color != color {
                    push_pawn_move(moves, from, target, promotion_rank);
                }
            }
            None => {
                if en_passant_allowed(position, from, target, color, log) {
                    moves.push(Move::new(from, target));
                }
            }
        }
    }
}

/// En passant is offered exactly when the immediately preceding move was a
/// two-square pawn advance by the opponent landing on the same rank as
/// `from`, one file away, and `target` is the square behind that pawn. Two
/// plies later the chance is gone.
fn en_passant_allowed(
    position: &Position,
    from: Square,
    target: Square,
    color: Color,
    log: &[Move],
) -> bool {
    let Some(last) = log.last() else {
        return false;
    };
    let Some(neighbor) = position.piece_at(last.to) else {
        return false;
    };
    if neighbor.kind != PieceKind::Pawn || neighbor.color == color {
        return false;
    }
    let was_double_advance = file_of(last.from) == file_of(last.to)
        && (rank_of(last.from) as i8 - rank_of(last.to) as i8).unsigned_abs() == 2;
    was_double_advance
        && rank_of(last.to) == rank_of(from)
        && (file_of(last.to) as i8 - file_of(from) as i8).unsigned_abs() == 1
        && file_of(target) == file_of(last.to)
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, promotion_rank: u8) {
    if rank_of(to) == promotion_rank {
        for kind in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Castling toward either rook: both pieces unmoved, every square strictly
/// between them empty, the king not currently in check, and no square the
/// king crosses (destination included) attacked by the enemy.
fn castling_moves(position: &Position, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    if piece.moved || is_in_check(position, piece.color) {
        return;
    }
    for direction in [1_i8, -1_i8] {
        if let Some(to) = castling_target(position, from, piece.color, direction) {
            moves.push(Move::new(from, to));
        }
    }
}

fn castling_target(
    position: &Position,
    king_from: Square,
    color: Color,
    direction: i8,
) -> Option<Square> {
    // The first piece outward from the king must be an own unmoved rook.
    let mut current = king_from;
    let rook_from = loop {
        current = offset(current, direction, 0)?;
        if let Some(piece) = position.piece_at(current) {
            if piece.color == color && piece.kind == PieceKind::Rook && !piece.moved {
                break current;
            }
            return None;
        }
    };
    // Rook adjacent to the king leaves no room for the two-square hop.
    let to_file = file_of(king_from) as i8 + direction * 2;
    let to = square(to_file as u8, rank_of(king_from))?;
    if !strictly_between(file_of(king_from) as i8, file_of(rook_from) as i8, to_file) {
        return None;
    }

    let enemy = color.opposite();
    for crossed in [direction, direction * 2] {
        let sq = offset(king_from, crossed, 0)?;
        if square_attacked_by(position, sq, enemy) {
            return None;
        }
    }
    Some(to)
}

fn strictly_between(king_file: i8, rook_file: i8, to_file: i8) -> bool {
    let low = king_file.min(rook_file);
    let high = king_file.max(rook_file);
    low < to_file && to_file < high
}
