use super::*;

use crate::moves::Move;

const INIT_BOARD: &str =
    "  b b b b b\n  b b b b b\n  b b - w w\n  w w w w w\n  w w w w w";

const INIT_BOARD_LEGEND: &str =
    "  5 b b b b b\n  4 b b b b b\n  3 b b - w w\n  2 w w w w w\n  1 w w w w w\n    a b c d e";

const GAME1: [&str; 7] = [
    "c2-c3", "c4-c2", "c1-c3", "a3-c1", "c3-a3", "c5-c4", "a3-c5-c3",
];

const GAME1_BOARD: &str =
    "  b b - b b\n  b - - b b\n  - - w w w\n  w - - w w\n  w w b w w";

fn mov(s: &str) -> Move {
    s.parse().expect("test move should parse")
}

fn make_moves(b: &mut Board, moves: &[&str]) {
    for s in moves {
        b.make_move(&mov(s));
    }
}

#[test]
fn test_init() {
    let b = Board::new();
    assert_eq!(INIT_BOARD, b.to_text(false));
    assert_eq!(INIT_BOARD_LEGEND, b.to_text(true));
    assert_eq!(b.whose_move(), PieceColor::White);
    assert!(!b.game_over());
}

#[test]
fn test_clear_restores_start() {
    let mut b = Board::new();
    make_moves(&mut b, &GAME1);
    b.clear();
    assert_eq!(b, Board::new());
    assert!(b.move_history().is_empty());
}

#[test]
fn test_legal_move() {
    let b = Board::new();
    assert!(b.legal_move(&mov("c2-c3")));
    // a2 is occupied by the mover's own piece.
    assert!(!b.legal_move(&mov("a1-a2")));
    // c3 is empty; there is nothing to move.
    assert!(!b.legal_move(&mov("c3-c4")));
}

#[test]
fn test_initial_moves_in_order() {
    // The only empty square is c3; four white pieces reach it, enumerated
    // by origin, then row offset, then column offset.
    let b = Board::new();
    let expected = vec![mov("b2-c3"), mov("c2-c3"), mov("d2-c3"), mov("d3-c3")];
    assert_eq!(b.get_moves(), expected);
}

#[test]
fn test_mandatory_capture() {
    let mut b = Board::new();
    make_moves(&mut b, &["c2-c3"]);
    assert!(b.jump_possible());

    let moves = b.get_moves();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(Move::is_jump), "only jumps while one exists");
    assert_eq!(moves, vec![mov("c4-c2")]);

    // The jump is mandatory even though simple moves would be legal
    // otherwise.
    assert!(!b.legal_move(&mov("c4-c3")));
}

#[test]
fn test_game1_end_position() {
    let mut b = Board::new();
    make_moves(&mut b, &GAME1);
    assert_eq!(GAME1_BOARD, b.to_text(false));
}

#[test]
fn test_undo_round_trip() {
    let mut b = Board::new();
    let start = b.clone();
    make_moves(&mut b, &GAME1);
    let end = b.clone();

    for _ in 0..GAME1.len() {
        b.undo();
    }
    assert_eq!(b, start, "failed to return to start");

    make_moves(&mut b, &GAME1);
    assert_eq!(b, end, "second pass failed to reach same position");
}

#[test]
#[should_panic(expected = "undo with no applied moves")]
fn test_undo_empty_history_panics() {
    let mut b = Board::new();
    b.undo();
}

#[test]
fn test_multi_jump_enumeration() {
    // Position before GAME1's final move: both a3 and e3 start a double
    // jump ending on c3. Only the maximal chains are offered, no prefixes.
    let mut b = Board::new();
    make_moves(&mut b, &GAME1[..6]);
    let before = b.clone();

    let moves = b.get_moves();
    assert_eq!(moves, vec![mov("a3-c5-c3"), mov("e3-c5-c3")]);
    assert!(!moves.contains(&mov("a3-c5")));

    // The speculative exploration must leave no residue.
    assert_eq!(b, before);
    assert_eq!(b.move_history().len(), 6);
}

#[test]
fn test_anti_oscillation() {
    // Lone white piece on c1, lone black piece on e3: horizontal shuffles
    // exercise the reversal rule without jumps or backward-move rejections.
    let mut b = Board::new();
    b.set_pieces("--w-- ----- ----b ----- -----", PieceColor::White)
        .unwrap();

    // No history referencing these squares: accepted unconditionally.
    assert!(b.legal_move(&mov("c1-b1")));
    b.make_move(&mov("c1-b1"));
    b.make_move(&mov("e3-e2"));

    // Direct reversal of the most recent move touching b1 is rejected...
    assert!(!b.legal_move(&mov("b1-c1")));
    // ...but continuing elsewhere from the same square is fine.
    assert!(b.legal_move(&mov("b1-a1")));

    // Once another move has touched the origin, the old endpoints are
    // free again.
    b.make_move(&mov("b1-a1"));
    b.make_move(&mov("e2-e1"));
    assert!(!b.legal_move(&mov("a1-b1")), "still a direct reversal");
}

#[test]
fn test_set_pieces() {
    let mut b = Board::new();
    b.set_pieces(
        "wwwww wwwww bb-ww bbbbb bbbbb",
        PieceColor::White,
    )
    .unwrap();
    assert_eq!(b, Board::new());
    assert!(b.move_history().is_empty());

    // Occupied cells are case-insensitive.
    b.set_pieces("WWWWW wwwww BB-ww bbbbb BBBBB", PieceColor::White)
        .unwrap();
    assert_eq!(b, Board::new());
}

#[test]
fn test_set_pieces_rejects_bad_input() {
    let mut b = Board::new();
    let before = b.clone();

    assert_eq!(
        b.set_pieces("wwwww", PieceColor::White),
        Err(BoardError::BadDescription)
    );
    assert_eq!(
        b.set_pieces("wwwww wwwww bbxww bbbbb bbbbb", PieceColor::White),
        Err(BoardError::BadDescription)
    );
    assert_eq!(
        b.set_pieces("wwwww wwwww bb-ww bbbbb bbbbb w", PieceColor::White),
        Err(BoardError::BadDescription)
    );
    assert_eq!(
        b.set_pieces("wwwww wwwww bb-ww bbbbb bbbbb", PieceColor::Empty),
        Err(BoardError::BadPlayerColor)
    );

    // Nothing was applied.
    assert_eq!(b, before);
}

#[test]
fn test_terminal_detection() {
    // A lone white piece on its far row has no forward, sideways, or jump
    // moves: the position is terminal as soon as it is loaded.
    let mut b = Board::new();
    b.set_pieces("----- ----- ----- ----- w----", PieceColor::White)
        .unwrap();
    assert!(b.game_over());
    assert!(b.get_moves().is_empty());
}

#[test]
fn test_make_move_detects_game_over() {
    // White jumps the last black piece; black is left with no pieces and
    // no moves.
    let mut b = Board::new();
    b.set_pieces("--w-- --b-- ----- ----- -----", PieceColor::White)
        .unwrap();
    assert!(!b.game_over());
    b.make_move(&mov("c1-c3"));
    assert!(b.game_over());
    assert_eq!(b.whose_move(), PieceColor::Black);
}

#[test]
fn test_odd_square_diagonal_rejected() {
    // b2 has index 6 (even) and allows diagonals; b1 has index 1 (odd)
    // and does not.
    let mut b = Board::new();
    b.set_pieces("-w--- ----- ----- ----- -----", PieceColor::White)
        .unwrap();
    assert!(!b.legal_move(&mov("b1-a2")));
    assert!(!b.legal_move(&mov("b1-c2")));
    assert!(b.legal_move(&mov("b1-b2")));

    b.set_pieces("----- -w--- ----- ----- -----", PieceColor::White)
        .unwrap();
    assert!(b.legal_move(&mov("b2-a3")));
    assert!(b.legal_move(&mov("b2-c3")));
}

#[test]
fn test_backward_moves_rejected() {
    let mut b = Board::new();
    b.set_pieces("----- --w-- ----b ----- -----", PieceColor::White)
        .unwrap();
    assert!(!b.legal_move(&mov("c2-c1")));

    b.set_pieces("----- --w-- ----b ----- -----", PieceColor::Black)
        .unwrap();
    assert!(!b.legal_move(&mov("e3-e4")));
    assert!(b.legal_move(&mov("e3-e2")));
}

#[test]
fn test_check_jump_whole_chain() {
    let mut b = Board::new();
    make_moves(&mut b, &GAME1[..6]);

    assert!(b.check_jump(&mov("a3-c5-c3")));
    assert!(b.check_jump(&mov("a3-c5")));
    // Second step jumps an empty square.
    assert!(!b.check_jump(&mov("a3-c5-a5")));
    // Steps must be contiguous: e3-c5 is a fine jump on its own, but it
    // does not continue from c5.
    assert!(!b.check_jump(&mov("a3-c5").then(mov("e3-c5"))));
    // Jumping straight back out captures b4 twice.
    assert!(!b.check_jump(&mov("a3-c5-a3")));
    // Not a jump at all.
    assert!(!b.check_jump(&mov("c2-c3")));
}

#[test]
fn test_view_mirrors_board() {
    let mut b = Board::new();
    let mut view = b.watch();

    assert_eq!(view.to_text(false), INIT_BOARD);
    assert!(!view.refresh(), "nothing changed yet");

    b.make_move(&mov("c2-c3"));
    assert!(view.refresh());
    assert_eq!(view.to_text(false), b.to_text(false));
    assert_eq!(view.whose_move(), PieceColor::Black);

    b.undo();
    assert!(view.refresh());
    assert_eq!(view.to_text(false), INIT_BOARD);
}

#[test]
fn test_clone_is_independent() {
    let mut b = Board::new();
    let copy = b.clone();
    b.make_move(&mov("c2-c3"));
    assert_ne!(b, copy);
    assert_eq!(copy, Board::new());
}
