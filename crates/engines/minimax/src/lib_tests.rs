use super::*;

use std::time::Duration;

use qirkat_core::{Move, PieceColor};

fn mov(s: &str) -> Move {
    s.parse().expect("test move should parse")
}

#[test]
fn static_score_of_start_position() {
    // Material is even; the advancement sums differ by 12 in White's
    // favor.
    let b = Board::new();
    assert_eq!(static_score(&b), 1200);
}

#[test]
fn static_score_of_lost_positions() {
    // A lone piece stuck on its far row loses for the side to move.
    let mut b = Board::new();
    b.set_pieces("----- ----- ----- ----- w----", PieceColor::White)
        .unwrap();
    assert!(b.game_over());
    assert_eq!(static_score(&b), -WINNING_VALUE);

    b.set_pieces("b---- ----- ----- ----- -----", PieceColor::Black)
        .unwrap();
    assert!(b.game_over());
    assert_eq!(static_score(&b), WINNING_VALUE);
}

#[test]
fn depth_one_prefers_highest_evaluation() {
    // Of the four openings, d3-c3 is the only one that raises White's
    // advancement sum.
    let mut engine = MinimaxEngine::new();
    let b = Board::new();
    let outcome = engine.search(&b, SearchLimits::depth(1));
    assert_eq!(outcome.best_move, Some(mov("d3-c3")));
    assert_eq!(outcome.score, 1300);
}

#[test]
fn equal_values_prefer_the_later_move() {
    // b3-b4 and d3-d4 are the only moves and evaluate identically, so the
    // later-enumerated one must win the tie.
    let mut b = Board::new();
    b.set_pieces("----- ----- bwbwb ----- -----", PieceColor::White)
        .unwrap();
    assert_eq!(b.get_moves(), vec![mov("b3-b4"), mov("d3-d4")]);

    let mut engine = MinimaxEngine::new();
    let outcome = engine.search(&b, SearchLimits::depth(1));
    assert_eq!(outcome.best_move, Some(mov("d3-d4")));
    assert_eq!(outcome.score, -2500);
}

#[test]
fn forced_reply_is_found() {
    let mut b = Board::new();
    b.make_move(&mov("c2-c3"));

    let mut engine = MinimaxEngine::new();
    let outcome = engine.search(&b, SearchLimits::depth(2));
    assert_eq!(outcome.best_move, Some(mov("c4-c2")));
}

#[test]
fn winning_double_jump_is_found() {
    // c1-c3-c5 captures both black pieces and ends the game.
    let mut b = Board::new();
    b.set_pieces("--w-- --b-- ----- --b-- -----", PieceColor::White)
        .unwrap();

    let mut engine = MinimaxEngine::new();
    let outcome = engine.search(&b, SearchLimits::depth(2));
    assert_eq!(outcome.best_move, Some(mov("c1-c3-c5")));
    assert_eq!(outcome.score, WINNING_VALUE);
}

#[test]
fn search_leaves_the_board_untouched() {
    let b = Board::new();
    let before = b.clone();
    let mut engine = MinimaxEngine::new();
    engine.search(&b, SearchLimits::depth(4));
    assert_eq!(b, before);
    assert!(b.move_history().is_empty());
}

#[test]
fn search_is_deterministic() {
    let b = Board::new();
    let mut engine = MinimaxEngine::new();
    let first = engine.search(&b, SearchLimits::depth(4));
    let second = engine.search(&b, SearchLimits::depth(4));
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.score, second.score);
    assert_eq!(first.nodes, second.nodes);
}

#[test]
fn exhausted_clock_stops_the_search() {
    let b = Board::new();
    let mut engine = MinimaxEngine::new();
    let outcome = engine.search(&b, SearchLimits::depth_and_time(8, Duration::ZERO));
    assert!(outcome.stopped);
    assert!(outcome.best_move.is_none());
}

#[test]
#[should_panic(expected = "cannot search a finished game")]
fn searching_a_finished_game_panics() {
    let mut b = Board::new();
    b.set_pieces("----- ----- ----- ----- w----", PieceColor::White)
        .unwrap();
    let mut engine = MinimaxEngine::new();
    engine.search(&b, SearchLimits::depth(2));
}
