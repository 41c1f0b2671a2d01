use super::ai::{self, eval, MemoryOpeningStore, OpeningStore, SearchLimits};
use super::robot::Robot;
use super::session::{GameSession, Outcome};
use crate::game::{file_of, parse_square, Color, Move, PieceKind, Position};

fn sq(name: &str) -> u8 {
    parse_square(name).expect("valid square")
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

fn session_from(placement: &str, side_to_move: Color) -> GameSession {
    let mut position = Position::from_placement(placement).expect("valid placement");
    position.set_side_to_move(side_to_move);
    GameSession::from_position(position)
}

fn perft(session: &mut GameSession, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = session.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut total = 0_u64;
    for candidate in moves {
        assert!(session.push_move(candidate));
        total += perft(session, depth - 1);
        session.pop_move();
    }
    total
}

#[test]
fn perft_from_start_matches_known_values() {
    let mut session = GameSession::new();
    assert_eq!(perft(&mut session, 1), 20);
    assert_eq!(perft(&mut session, 2), 400);
    assert_eq!(perft(&mut session, 3), 8_902);
}

#[test]
fn attempt_move_accepts_legal_and_rejects_illegal() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    assert!(session.piece_at(sq("e4")).is_some());
    assert!(session.piece_at(sq("e2")).is_none());
    assert_eq!(session.move_log(), &[mv("e2", "e4")]);

    let before = session.position().clone();
    assert!(!session.attempt_move(mv("e7", "e4")));
    assert!(!session.attempt_move(mv("d2", "d5")));
    assert!(!session.attempt_move(Move::new(70, 3)));
    assert_eq!(session.position(), &before);
    assert_eq!(session.move_log().len(), 1);
}

#[test]
fn capture_credits_the_capturing_side_and_undo_refunds_it() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    assert!(session.attempt_move(mv("d7", "d5")));
    let before_capture = session.position().clone();

    assert!(session.attempt_move(mv("e4", "d5")));
    assert_eq!(session.captured_value(Color::White), 1);
    assert_eq!(session.captured_value(Color::Black), 0);

    session.undo();
    assert_eq!(session.captured_value(Color::White), 0);
    assert_eq!(session.position(), &before_capture);
}

#[test]
fn undo_without_history_is_a_no_op() {
    let mut session = GameSession::new();
    let before = session.position().clone();
    session.undo();
    session.redo();
    assert_eq!(session.position(), &before);
}

#[test]
fn redo_reproduces_the_undone_move_until_a_fresh_move_clears_it() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    let after_move = session.position().clone();

    session.undo();
    assert!(session.piece_at(sq("e4")).is_none());
    session.redo();
    assert_eq!(session.position(), &after_move);
    assert_eq!(session.move_log(), &[mv("e2", "e4")]);

    // A fresh move invalidates the redo history.
    session.undo();
    assert!(session.attempt_move(mv("d2", "d4")));
    let after_fresh = session.position().clone();
    session.redo();
    assert_eq!(session.position(), &after_fresh);
}

#[test]
fn undo_restores_castling_eligibility() {
    let mut session = session_from("4k3/8/8/8/8/8/8/4K2R", Color::White);
    assert!(session.legal_moves().contains(&mv("e1", "g1")));

    assert!(session.attempt_move(mv("e1", "f1")));
    session.undo();
    assert!(session.legal_moves().contains(&mv("e1", "g1")));
}

#[test]
fn castling_scenario_with_clear_queenside_is_offered() {
    let session = session_from("4k3/8/8/8/8/8/8/R3K3", Color::White);
    assert!(session.legal_moves().contains(&mv("e1", "c1")));
}

#[test]
fn pinned_piece_may_not_expose_its_own_king() {
    let session = session_from("4k3/4r3/8/8/8/8/4B3/4K3", Color::White);
    assert!(session.moves_from(sq("e2")).is_empty());
    // The king itself can still step off the file.
    assert!(!session.moves_from(sq("e1")).is_empty());
}

#[test]
fn en_passant_appears_and_expires_through_real_play() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    assert!(session.attempt_move(mv("a7", "a6")));
    assert!(session.attempt_move(mv("e4", "e5")));
    assert!(session.attempt_move(mv("d7", "d5")));
    assert!(session.legal_moves().contains(&mv("e5", "d6")));

    // Decline it; the chance must not survive the next pair of moves.
    assert!(session.attempt_move(mv("b1", "c3")));
    assert!(session.attempt_move(mv("a6", "a5")));
    assert!(!session.legal_moves().contains(&mv("e5", "d6")));
}

#[test]
fn non_adjacent_double_advance_offers_no_en_passant() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    assert!(session.attempt_move(mv("g8", "f6")));
    // No white pawn may move diagonally onto an empty square now.
    for candidate in session.legal_moves() {
        let origin = session.piece_at(candidate.from).expect("mover exists");
        let diagonal = file_of(candidate.from) != file_of(candidate.to);
        if origin.kind == PieceKind::Pawn && diagonal {
            assert!(session.piece_at(candidate.to).is_some());
        }
    }
}

#[test]
fn is_promotion_is_exact_about_pawn_and_rank() {
    let session = session_from("4k3/P7/8/8/8/8/8/R3K3", Color::White);
    assert!(session.is_promotion(sq("a7"), sq("a8")));
    assert!(!session.is_promotion(sq("a7"), sq("a6")));
    assert!(!session.is_promotion(sq("a1"), sq("a8")));
}

#[test]
fn fools_mate_is_reported_as_checkmate_for_black() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("f2", "f3")));
    assert!(session.attempt_move(mv("e7", "e5")));
    assert!(session.attempt_move(mv("g2", "g4")));
    assert_eq!(session.outcome(), None);
    assert!(session.attempt_move(mv("d8", "h4")));
    assert!(session.is_game_over());
    assert_eq!(
        session.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn bare_kings_with_no_moves_yield_stalemate() {
    let session = session_from("k7/8/1Q5K/8/8/8/8/8", Color::Black);
    assert_eq!(session.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn search_prefers_the_free_queen_at_depth_one() {
    let mut session = session_from("4k3/8/8/3q4/4P3/8/8/4K3", Color::White);
    let outcome = ai::search_best_move(&mut session, SearchLimits::new(1));
    assert_eq!(outcome.best_move, Some(mv("e4", "d5")));
    assert_eq!(outcome.score, 9);
}

#[test]
fn search_leaves_the_session_untouched() {
    let mut session = GameSession::new();
    assert!(session.attempt_move(mv("e2", "e4")));
    let position = session.position().clone();
    let log = session.move_log().to_vec();

    let outcome = ai::search_best_move(&mut session, SearchLimits::default());
    assert!(outcome.best_move.is_some());
    assert_eq!(session.position(), &position);
    assert_eq!(session.move_log(), log.as_slice());
    assert_eq!(session.captured_value(Color::White), 0);
    assert_eq!(session.captured_value(Color::Black), 0);

    // The undone redo history must survive a search as well.
    session.undo();
    let _ = ai::search_best_move(&mut session, SearchLimits::new(2));
    session.redo();
    assert_eq!(session.position(), &position);
}

#[test]
fn first_move_reaching_the_best_score_is_retained() {
    // Both pawn captures win exactly one pawn; b5 is generated first.
    let mut session = session_from("4k3/8/8/1p1p4/2P5/8/8/4K3", Color::White);
    let outcome = ai::search_best_move(&mut session, SearchLimits::new(1));
    assert_eq!(outcome.score, 1);
    assert_eq!(outcome.best_move, Some(mv("c4", "b5")));
}

#[test]
fn pruned_search_scores_match_plain_minimax() {
    fn plain_minimax(
        session: &mut GameSession,
        side: Color,
        depth: u8,
        maximizing: bool,
    ) -> i32 {
        if depth == 0 {
            return eval::captured_differential(session, side);
        }
        let moves = session.legal_moves();
        if moves.is_empty() {
            return eval::captured_differential(session, side);
        }
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for candidate in moves {
            assert!(session.push_move(candidate));
            let score = plain_minimax(session, side, depth - 1, !maximizing);
            session.pop_move();
            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
        best
    }

    for placement in [
        "4k3/8/8/1p1p4/2P5/8/8/4K3",
        "4k3/2p5/8/3p4/2P1P3/8/8/4K3",
        "r3k3/8/8/8/8/8/8/R3K3",
    ] {
        let mut session = session_from(placement, Color::White);
        let side = Color::White;
        let expected = plain_minimax(&mut session, side, 3, true);
        let outcome = ai::search_best_move(&mut session, SearchLimits::new(3));
        assert_eq!(outcome.score, expected, "placement {placement}");
    }
}

#[test]
fn memory_store_returns_the_most_frequent_continuation() {
    let mut store = MemoryOpeningStore::new();
    store.record("sig", "d2d4");
    store.record("sig", "e2e4");
    store.record("sig", "e2e4");
    assert_eq!(
        store.most_common_continuation("sig"),
        Some("e2e4".to_string())
    );
    assert_eq!(store.most_common_continuation("other"), None);

    // Ties keep the earliest-recorded move.
    let mut tied = MemoryOpeningStore::new();
    tied.record("sig", "c2c4");
    tied.record("sig", "g1f3");
    assert_eq!(
        tied.most_common_continuation("sig"),
        Some("c2c4".to_string())
    );
}

#[test]
fn book_move_is_validated_and_window_bounded() {
    let start_signature = GameSession::new().position().placement_signature();

    let mut store = MemoryOpeningStore::new();
    store.record(&start_signature, "e2e4");
    let session = GameSession::new();
    assert_eq!(ai::book_move(&session, &store), Some(mv("e2", "e4")));

    // A recorded move that is not legal here falls through to the search.
    let mut bogus = MemoryOpeningStore::new();
    bogus.record(&start_signature, "e2e5");
    assert_eq!(ai::book_move(&session, &bogus), None);

    // Shuffle the knights until twenty plies have passed; the placement is
    // the start placement again, but the book window is closed.
    let mut session = GameSession::new();
    for _ in 0..5 {
        assert!(session.attempt_move(mv("b1", "c3")));
        assert!(session.attempt_move(mv("b8", "c6")));
        assert!(session.attempt_move(mv("c3", "b1")));
        assert!(session.attempt_move(mv("c6", "b8")));
    }
    assert_eq!(session.position().placement_signature(), start_signature);
    assert_eq!(session.move_log().len(), 20);
    assert_eq!(ai::book_move(&session, &store), None);
}

#[test]
fn opening_store_loads_from_json() {
    let raw = r#"{"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR": ["e2e4", "e2e4", "d2d4"]}"#;
    let store = MemoryOpeningStore::from_json_reader(raw.as_bytes()).expect("valid book JSON");
    let session = GameSession::new();
    assert_eq!(ai::book_move(&session, &store), Some(mv("e2", "e4")));

    assert!(MemoryOpeningStore::from_json_reader("not json".as_bytes()).is_err());
}

#[test]
fn robot_prefers_the_book_then_answers_with_a_legal_move() {
    let start_signature = GameSession::new().position().placement_signature();
    let mut store = MemoryOpeningStore::new();
    store.record(&start_signature, "e2e4");

    let mut session = GameSession::new();
    let mut robot = Robot::seeded(SearchLimits::new(2), 7);
    let choice = robot
        .pick_move(&mut session, Some(&store))
        .expect("move available");
    assert_eq!(choice, mv("e2", "e4"));

    // Without a book the reply comes from the search and must be legal.
    let choice = robot.pick_move(&mut session, None).expect("move available");
    assert!(session.legal_moves().contains(&choice));
}

#[test]
fn user_move_applies_the_reply_unless_the_game_ended() {
    let mut session = GameSession::new();
    let mut robot = Robot::seeded(SearchLimits::new(2), 7);
    assert!(!robot.user_move(&mut session, None, mv("e2", "e5")));
    assert_eq!(session.move_log().len(), 0);

    assert!(robot.user_move(&mut session, None, mv("e2", "e4")));
    assert_eq!(session.move_log().len(), 2);

    // A mating user move ends the game with no reply.
    let mut session = session_from("r5k1/8/8/8/8/8/5PPP/6K1", Color::Black);
    let mut robot = Robot::seeded(SearchLimits::new(2), 7);
    assert!(robot.user_move(&mut session, None, mv("a8", "a1")));
    assert_eq!(session.move_log().len(), 1);
    assert!(session.is_game_over());
}

#[test]
fn spawned_search_delivers_the_same_kind_of_outcome() {
    let session = GameSession::new();
    let handle = ai::spawn_search(session.clone(), SearchLimits::new(2));
    let outcome = handle.wait().expect("search completes");
    let chosen = outcome.best_move.expect("start position has moves");
    assert!(session.legal_moves().contains(&chosen));
}

#[test]
fn hand_slot_blocks_other_mutations_until_resolved() {
    let mut session = GameSession::new();
    assert!(session.pick_up(sq("e2")));
    assert_eq!(session.in_hand(), Some(sq("e2")));
    assert!(!session.pick_up(sq("d2")));

    // Everything else refuses to run while a piece is held.
    assert!(!session.attempt_move(mv("d2", "d4")));
    session.undo();
    session.redo();
    assert_eq!(session.move_log().len(), 0);

    assert!(session.put_down(sq("e4"), None));
    assert_eq!(session.in_hand(), None);
    assert!(session.piece_at(sq("e4")).is_some());

    // An illegal drop returns the piece and empties the hand.
    assert!(session.pick_up(sq("d7")));
    assert!(!session.put_down(sq("d3"), None));
    assert_eq!(session.in_hand(), None);
    assert!(session.piece_at(sq("d7")).is_some());

    // Only the side to move may pick up a piece.
    assert!(!session.pick_up(sq("d2")));
}
