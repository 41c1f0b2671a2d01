#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Rank delta of a single pawn advance for this color.
    pub(crate) fn pawn_step(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    pub(crate) fn pawn_start_rank(self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 6,
        }
    }

    pub(crate) fn promotion_rank(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    pub(crate) fn back_rank(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Material worth used for capture accounting and the search's static
    /// evaluation. The king carries no finite value; it is never captured
    /// through legal play, so its entry is never tallied.
    pub fn material_value(self) -> u32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0,
        }
    }

    fn white_placement_char(self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Pawn => 'P',
        }
    }

    pub fn placement_char(self, color: Color) -> char {
        let white = self.white_placement_char();
        match color {
            Color::White => white,
            Color::Black => white.to_ascii_lowercase(),
        }
    }

    pub fn from_placement_char(value: char) -> Option<(Self, Color)> {
        let color = if value.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match value.to_ascii_uppercase() {
            'K' => Self::King,
            'Q' => Self::Queen,
            'R' => Self::Rook,
            'B' => Self::Bishop,
            'N' => Self::Knight,
            'P' => Self::Pawn,
            _ => return None,
        };
        Some((kind, color))
    }

    fn from_promotion_char(value: char) -> Option<Self> {
        match value.to_ascii_lowercase() {
            'q' => Some(Self::Queen),
            'r' => Some(Self::Rook),
            'b' => Some(Self::Bishop),
            'n' => Some(Self::Knight),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub moved: bool,
}

impl Piece {
    /// A freshly placed piece; `moved` becomes true permanently the first
    /// time the piece is relocated. The flag gates the pawn double advance
    /// and castling eligibility.
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            moved: false,
        }
    }
}

pub type Square = u8;

pub const BOARD_SQUARES: usize = 64;

pub fn square(file: u8, rank: u8) -> Option<Square> {
    if file < 8 && rank < 8 {
        Some((rank * 8) + file)
    } else {
        None
    }
}

pub fn file_of(square: Square) -> u8 {
    square % 8
}

pub fn rank_of(square: Square) -> u8 {
    square / 8
}

/// The square reached from `from` by the given file/rank deltas, or `None`
/// when that runs off the board.
pub(crate) fn offset(from: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = file_of(from) as i8 + file_delta;
    let rank = rank_of(from) as i8 + rank_delta;
    if !(0..8).contains(&file) || !(0..8).contains(&rank) {
        return None;
    }
    square(file as u8, rank as u8)
}

pub fn square_name(square: Square) -> String {
    let file = (b'a' + file_of(square)) as char;
    let rank = (b'1' + rank_of(square)) as char;
    format!("{file}{rank}")
}

pub fn parse_square(value: &str) -> Option<Square> {
    if value.len() != 2 {
        return None;
    }
    let mut chars = value.chars();
    let file_char = chars.next()?.to_ascii_lowercase();
    let rank_char = chars.next()?;
    if !('a'..='h').contains(&file_char) || !('1'..='8').contains(&rank_char) {
        return None;
    }
    let file = (file_char as u8).saturating_sub(b'a');
    let rank = (rank_char as u8).saturating_sub(b'1');
    square(file, rank)
}

/// Parse a move in coordinate notation (`e2e4`, `e7e8q`) into its parts.
/// This is the form the opening store records continuations in.
pub fn parse_coordinate_move(value: &str) -> Option<(Square, Square, Option<PieceKind>)> {
    if value.len() != 4 && value.len() != 5 {
        return None;
    }
    let from = parse_square(value.get(0..2)?)?;
    let to = parse_square(value.get(2..4)?)?;
    let promotion = match value.get(4..5) {
        Some(ch) => Some(PieceKind::from_promotion_char(ch.chars().next()?)?),
        None => None,
    };
    Some((from, to, promotion))
}
