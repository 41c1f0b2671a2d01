use super::position::Position;
use super::types::{square, Color, Piece, PieceKind};

pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The standard initial position: back ranks on ranks 0 and 7, pawns on
/// ranks 1 and 6, White to move, every piece unmoved.
pub fn standard_position() -> Position {
    let mut position = Position::empty();
    position.set_side_to_move(Color::White);

    for file in 0..8_u8 {
        let kind = STANDARD_BACK_RANK[file as usize];
        let white_back = square(file, 0).expect("valid white back-rank square");
        let white_pawn = square(file, 1).expect("valid white pawn square");
        let black_pawn = square(file, 6).expect("valid black pawn square");
        let black_back = square(file, 7).expect("valid black back-rank square");

        position.set_piece(white_back, Some(Piece::new(Color::White, kind)));
        position.set_piece(white_pawn, Some(Piece::new(Color::White, PieceKind::Pawn)));
        position.set_piece(black_pawn, Some(Piece::new(Color::Black, PieceKind::Pawn)));
        position.set_piece(black_back, Some(Piece::new(Color::Black, kind)));
    }

    position
}
