use crate::game::{
    apply_on_board, is_in_check, piece_moves, rank_of, revert_on_board, side_moves, square_name,
    standard_position, Color, Move, MoveRecord, Piece, PieceKind, Position, Square,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

/// The game controller: one position, its move log, undo/redo stacks and
/// the per-color captured-value tally. Everything mutates in place; a new
/// game replaces the whole session, so the stacks and tally can never
/// outlive the position they describe.
#[derive(Debug, Clone)]
pub struct GameSession {
    position: Position,
    move_log: Vec<Move>,
    undo_stack: Vec<MoveRecord>,
    redo_stack: Vec<Move>,
    captured: [u32; 2],
    hand: Option<Square>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            position: standard_position(),
            move_log: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            captured: [0, 0],
            hand: None,
        }
    }

    /// A session over an arbitrary position with empty history, e.g. one
    /// rebuilt from a placement signature.
    pub fn from_position(position: Position) -> Self {
        Self {
            position,
            move_log: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            captured: [0, 0],
            hand: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position.piece_at(square)
    }

    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Material value `color` has captured from its opponent so far.
    pub fn captured_value(&self, color: Color) -> u32 {
        self.captured[color.index()]
    }

    /// Every legal move for the side to move: the generator's pseudo-legal
    /// set minus moves that leave the mover's own king attacked.
    pub fn legal_moves(&self) -> Vec<Move> {
        let side = self.position.side_to_move();
        side_moves(&self.position, &self.move_log)
            .into_iter()
            .filter(|&mv| !self.leaves_king_attacked(mv, side))
            .collect()
    }

    /// Legal moves of the piece on `from`; empty unless that piece belongs
    /// to the side to move. This is the query a presentation layer polls to
    /// highlight destinations.
    pub fn moves_from(&self, from: Square) -> Vec<Move> {
        let side = self.position.side_to_move();
        if !self
            .position
            .piece_at(from)
            .is_some_and(|piece| piece.color == side)
        {
            return Vec::new();
        }
        piece_moves(&self.position, from, &self.move_log)
            .into_iter()
            .filter(|&mv| !self.leaves_king_attacked(mv, side))
            .collect()
    }

    /// Apply `mv` if it is legal. On success the capture tally, move log
    /// and undo stack are updated and the redo history is invalidated. On
    /// failure nothing changes and `false` is returned; that return value
    /// is the sole error channel for illegal moves.
    pub fn attempt_move(&mut self, mv: Move) -> bool {
        if self.hand.is_some() {
            return false;
        }
        if !self.legal_moves().contains(&mv) {
            tracing::debug!(
                from = %square_name(mv.from),
                to = %square_name(mv.to),
                "rejected illegal move"
            );
            return false;
        }
        if !self.push_move(mv) {
            return false;
        }
        self.redo_stack.clear();
        true
    }

    /// True exactly when the piece on `from` is a pawn and `to` lies on the
    /// rank farthest from that pawn's start, i.e. the caller must supply a
    /// promotion kind for the move to be legal.
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.position.piece_at(from).is_some_and(|piece| {
            piece.kind == PieceKind::Pawn && rank_of(to) == piece.color.promotion_rank()
        })
    }

    /// Reverse the most recent applied move, restoring board contents, the
    /// capture tally and every `moved` flag, and remember it for `redo`.
    /// No-op when no move has been made.
    pub fn undo(&mut self) {
        if self.hand.is_some() {
            return;
        }
        if let Some(mv) = self.pop_move() {
            self.redo_stack.push(mv);
        }
    }

    /// Re-apply the most recently undone move exactly as `attempt_move`
    /// would. No-op when the redo history is empty (any fresh move clears
    /// it).
    pub fn redo(&mut self) {
        if self.hand.is_some() {
            return;
        }
        let Some(mv) = self.redo_stack.pop() else {
            return;
        };
        if !self.push_move(mv) {
            self.redo_stack.push(mv);
        }
    }

    /// Terminal once the side to move has zero legal moves: checkmate if
    /// its king is attacked, stalemate otherwise. `None` while in progress.
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.legal_moves().is_empty() {
            return None;
        }
        let side = self.position.side_to_move();
        if is_in_check(&self.position, side) {
            Some(Outcome::Checkmate {
                winner: side.opposite(),
            })
        } else {
            Some(Outcome::Stalemate)
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Lift a piece of the side to move into the single in-hand slot. The
    /// piece stays on the board; the slot only marks it as held so a
    /// pointer-driven caller can render it under the cursor. While a piece
    /// is in hand every other mutation refuses to run.
    pub fn pick_up(&mut self, square: Square) -> bool {
        if self.hand.is_some() {
            return false;
        }
        let side = self.position.side_to_move();
        match self.position.piece_at(square) {
            Some(piece) if piece.color == side => {
                self.hand = Some(square);
                true
            }
            _ => false,
        }
    }

    pub fn in_hand(&self) -> Option<Square> {
        self.hand
    }

    /// Resolve the in-hand piece: commit it as a move to `to` (with the
    /// chosen promotion kind where `is_promotion` said one is needed) or,
    /// when the move is illegal or targets its own square, return it to its
    /// origin. Either way the hand is empty afterwards.
    pub fn put_down(&mut self, to: Square, promotion: Option<PieceKind>) -> bool {
        let Some(from) = self.hand.take() else {
            return false;
        };
        if to == from {
            return false;
        }
        let mv = match promotion {
            Some(kind) => Move::promoting(from, to, kind),
            None => Move::new(from, to),
        };
        self.attempt_move(mv)
    }

    /// Apply without the legality membership test or redo invalidation.
    /// The search backtracks through this pair; a push that succeeds is
    /// always undone by a matching `pop_move`, so the caller-visible state
    /// is untouched once a search returns.
    pub(crate) fn push_move(&mut self, mv: Move) -> bool {
        let Some(record) = apply_on_board(&mut self.position, mv, &self.move_log) else {
            return false;
        };
        if let Some((_, captured)) = record.captured {
            self.captured[record.moved.color.index()] += captured.kind.material_value();
        }
        self.move_log.push(mv);
        self.undo_stack.push(record);
        true
    }

    pub(crate) fn pop_move(&mut self) -> Option<Move> {
        let record = self.undo_stack.pop()?;
        revert_on_board(&mut self.position, &record);
        if let Some((_, captured)) = record.captured {
            let tally = &mut self.captured[record.moved.color.index()];
            *tally = tally.saturating_sub(captured.kind.material_value());
        }
        self.move_log.pop();
        Some(record.mv)
    }

    fn leaves_king_attacked(&self, mv: Move, side: Color) -> bool {
        let mut next = self.position.clone();
        match apply_on_board(&mut next, mv, &self.move_log) {
            Some(_) => is_in_check(&next, side),
            None => true,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
