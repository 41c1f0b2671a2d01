use super::setup::STANDARD_BACK_RANK;
use super::types::{square, Color, Piece, PieceKind, Square, BOARD_SQUARES};

/// Board state and point queries only; no legality logic lives here.
/// King squares are cached so check probes never scan the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; BOARD_SQUARES],
    side_to_move: Color,
    kings: [Option<Square>; 2],
}

impl Position {
    pub fn empty() -> Self {
        Self {
            board: [None; BOARD_SQUARES],
            side_to_move: Color::White,
            kings: [None; 2],
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(square as usize).copied().flatten()
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> bool {
        let Some(slot) = self.board.get_mut(square as usize) else {
            return false;
        };
        if let Some(old) = *slot {
            if old.kind == PieceKind::King {
                self.kings[old.color.index()] = None;
            }
        }
        *slot = piece;
        if let Some(new) = piece {
            if new.kind == PieceKind::King {
                self.kings[new.color.index()] = Some(square);
            }
        }
        true
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, side_to_move: Color) {
        self.side_to_move = side_to_move;
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    pub fn piece_count(&self, color: Color) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|piece| piece.color == color)
            .count()
    }

    /// All occupied squares of one color, scanning a1 upward. Generation
    /// order matters: the search keeps the first best-scoring move.
    pub fn squares_of(&self, color: Color) -> Vec<Square> {
        (0..BOARD_SQUARES as Square)
            .filter(|&sq| self.piece_at(sq).is_some_and(|piece| piece.color == color))
            .collect()
    }

    /// The board-only placement field of FEN (rank 8 first, `/`-separated,
    /// digit runs for empty stretches). This string keys the opening book.
    pub fn placement_signature(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in (0..8_u8).rev() {
            let mut segment = String::new();
            let mut empty_run = 0_u8;
            for file in 0..8_u8 {
                let sq = square(file, rank).expect("rank/file in range");
                match self.piece_at(sq) {
                    Some(piece) => {
                        if empty_run > 0 {
                            segment.push(char::from(b'0' + empty_run));
                            empty_run = 0;
                        }
                        segment.push(piece.kind.placement_char(piece.color));
                    }
                    None => {
                        empty_run += 1;
                    }
                }
            }
            if empty_run > 0 {
                segment.push(char::from(b'0' + empty_run));
            }
            ranks.push(segment);
        }
        ranks.join("/")
    }

    /// Rebuild a position from a placement signature, with White to move.
    /// A piece standing on a square it could still occupy unmoved (pawns on
    /// their start rank, other kinds on their standard home squares) gets
    /// `moved == false`, so fixtures keep castling and double-advance
    /// eligibility.
    pub fn from_placement(placement: &str) -> Option<Self> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return None;
        }

        let mut position = Self::empty();
        for (row, segment) in ranks.iter().enumerate() {
            let rank = 7_u8.saturating_sub(row as u8);
            let mut file = 0_u8;
            for ch in segment.chars() {
                if ch.is_ascii_digit() {
                    let skip = ch.to_digit(10)? as u8;
                    if skip == 0 || file + skip > 8 {
                        return None;
                    }
                    file += skip;
                    continue;
                }
                let (kind, color) = PieceKind::from_placement_char(ch)?;
                let sq = square(file, rank)?;
                let mut piece = Piece::new(color, kind);
                piece.moved = !on_home_square(kind, color, file, rank);
                position.set_piece(sq, Some(piece));
                file += 1;
            }
            if file != 8 {
                return None;
            }
        }
        Some(position)
    }
}

fn on_home_square(kind: PieceKind, color: Color, file: u8, rank: u8) -> bool {
    match kind {
        PieceKind::Pawn => rank == color.pawn_start_rank(),
        _ => rank == color.back_rank() && STANDARD_BACK_RANK[file as usize] == kind,
    }
}
