use crossbeam_channel::{unbounded, Sender};
use thiserror::Error;

use std::fmt;

use crate::moves::Move;
use crate::types::*;
use crate::view::BoardView;

use crate::types::PieceColor::{Black, Empty, White};

/// Starting arrangement, bottom row first.
const ORIGIN: [PieceColor; 25] = [
    White, White, White, White, White,
    White, White, White, White, White,
    Black, Black, Empty, White, White,
    Black, Black, Black, Black, Black,
    Black, Black, Black, Black, Black,
];

/// Rejection of a malformed board description.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("bad board description: expected 25 cells of 'b', 'w', or '-'")]
    BadDescription,
    #[error("bad player color: next mover must be White or Black")]
    BadPlayerColor,
}

/// A Qirkat board.
///
/// Holds the 25 cells, the side to move, the terminal flag, and the
/// chronological list of applied move chains. The move list serves both
/// undo and the rule forbidding a simple move that directly reverses the
/// previous one. All mutation goes through `make_move`/`undo` (plus
/// `clear`/`set_pieces`/`copy_from`), and every successful mutation is
/// published to subscribed views.
#[derive(Debug)]
pub struct Board {
    cells: [PieceColor; 25],
    whose_move: PieceColor,
    game_over: bool,
    move_list: Vec<Move>,
    watchers: Vec<Sender<Board>>,
}

impl Board {
    /// A new board in the starting position, White to move.
    pub fn new() -> Board {
        Board {
            cells: ORIGIN,
            whose_move: White,
            game_over: false,
            move_list: Vec::new(),
            watchers: Vec::new(),
        }
    }

    /// Reset to the starting position and forget all history.
    pub fn clear(&mut self) {
        self.cells = ORIGIN;
        self.whose_move = White;
        self.game_over = false;
        self.move_list.clear();
        self.notify();
    }

    /// Copy OTHER's full state (cells, mover, terminal flag, history)
    /// into this board. Watchers are unaffected and not notified.
    pub fn copy_from(&mut self, other: &Board) {
        self.cells = other.cells;
        self.whose_move = other.whose_move;
        self.game_over = other.game_over;
        self.move_list = other.move_list.clone();
    }

    /// Load a position from STR: 25 cells of `b`, `w`, or `-` (occupied
    /// cells case-insensitive), row-major from the bottom-left, with any
    /// embedded whitespace ignored. NEXT_MOVE is the side to move. On
    /// error nothing is applied. Loading starts a fresh game: the move
    /// history is reset.
    pub fn set_pieces(&mut self, s: &str, next_move: PieceColor) -> Result<(), BoardError> {
        if next_move == Empty {
            return Err(BoardError::BadPlayerColor);
        }
        let mut cells = [Empty; 25];
        let mut n = 0;
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if n == NUM_SQUARES as usize {
                return Err(BoardError::BadDescription);
            }
            cells[n] = PieceColor::from_cell_char(c).ok_or(BoardError::BadDescription)?;
            n += 1;
        }
        if n != NUM_SQUARES as usize {
            return Err(BoardError::BadDescription);
        }

        self.cells = cells;
        self.whose_move = next_move;
        self.move_list.clear();
        self.game_over = !self.is_move();
        self.notify();
        Ok(())
    }

    /// Contents of the square with linearized index K.
    pub fn get(&self, k: u8) -> PieceColor {
        self.cells[k as usize]
    }

    /// Contents of the square at column C, row R.
    pub fn get_square(&self, c: char, r: char) -> PieceColor {
        self.get(index(c, r))
    }

    fn set(&mut self, k: u8, v: PieceColor) {
        self.cells[k as usize] = v;
    }

    /// The side with the next move. Arbitrary if the game is over.
    pub fn whose_move(&self) -> PieceColor {
        self.whose_move
    }

    /// True iff the side to move has no legal move.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// The chains applied so far, oldest first.
    pub fn move_history(&self) -> &[Move] {
        &self.move_list
    }

    /// Authoritative legality check for an externally submitted move.
    pub fn legal_move(&self, mov: &Move) -> bool {
        if mov.is_jump() {
            return self.check_jump(mov);
        }
        if self.jump_possible() {
            // Capture is mandatory: no simple move while a jump exists.
            return false;
        }
        self.simple_move_ok(mov) && self.not_reversal(mov)
    }

    /// Generator-side legality check. Identical to `legal_move` except
    /// that the mandatory-capture exclusion is omitted: the generator only
    /// reaches this in the branch where it has already established that no
    /// jump exists (simple enumeration) or probes jumps directly.
    fn legal_move_fast(&self, mov: &Move) -> bool {
        if mov.is_jump() {
            return self.check_jump_fast(mov);
        }
        self.simple_move_ok(mov) && self.not_reversal(mov)
    }

    /// Board-independent-of-history constraints on a simple move.
    fn simple_move_ok(&self, mov: &Move) -> bool {
        let mover = self.whose_move;
        if mover == White && mov.row0() == '5' {
            return false;
        }
        if mover == Black && mov.row0() == '1' {
            return false;
        }
        if self.get(mov.from_index()) != mover {
            return false;
        }
        if self.get(mov.to_index()) != Empty {
            return false;
        }
        // No moving backward.
        if mover == White && mov.row1() < mov.row0() {
            return false;
        }
        if mover == Black && mov.row1() > mov.row0() {
            return false;
        }
        let dc = (col_of(mov.to_index()) - col_of(mov.from_index())).abs();
        let dr = (row_of(mov.to_index()) - row_of(mov.from_index())).abs();
        if dc > 2 || dr > 2 {
            return false;
        }
        // Span (2,1) or (1,2): a jump-length displacement with no capture.
        if dc + dr == 3 {
            return false;
        }
        // Odd squares have no diagonal edges.
        if dc != 0 && dr != 0 && mov.from_index() % 2 == 1 {
            return false;
        }
        true
    }

    /// The anti-oscillation rule: walking the history backward, the first
    /// earlier move touching this move's endpoints decides. A direct
    /// reversal of that move (same two endpoints, swapped) is rejected;
    /// any other touch, or no touch at all, accepts.
    fn not_reversal(&self, mov: &Move) -> bool {
        for prev in self.move_list.iter().rev() {
            if mov.from_index() == prev.from_index()
                || (mov.from_index() == prev.to_index() && mov.to_index() != prev.from_index())
            {
                return true;
            }
            if mov.from_index() == prev.to_index() && mov.to_index() == prev.from_index() {
                return false;
            }
        }
        true
    }

    /// True iff MOV is a legal jump sequence from the current position.
    /// Later steps are validated against the current cells, except that a
    /// square may not be jumped twice and the chain's own vacated origin
    /// is a valid landing square.
    pub fn check_jump(&self, mov: &Move) -> bool {
        if !self.check_jump_fast(mov) {
            return false;
        }
        let mut captured = vec![mov.jumped_index()];
        let mut at = mov.to_index();
        let mut step = mov.tail();
        while let Some(m) = step {
            // Vestigial glue links reposition nothing; they only have to
            // sit on the junction square, and skip the jump checks.
            if m.is_vestigial() {
                if m.from_index() != at {
                    return false;
                }
                step = m.tail();
                continue;
            }
            // Each step continues from the previous landing square.
            if m.from_index() != at {
                return false;
            }
            if !m.jump_step() {
                return false;
            }
            // The landing square must be free. The chain's own origin
            // counts as free: the piece vacated it on the first step.
            if self.get(m.to_index()) != Empty && m.to_index() != mov.from_index() {
                return false;
            }
            let over = self.get(m.jumped_index());
            if over == self.whose_move || over == Empty {
                return false;
            }
            if captured.contains(&m.jumped_index()) {
                return false;
            }
            let dc = (col_of(m.to_index()) - col_of(m.from_index())).abs();
            let dr = (row_of(m.to_index()) - row_of(m.from_index())).abs();
            if dc > 2 || dr > 2 {
                return false;
            }
            if dc + dr == 3 {
                return false;
            }
            if dc != 0 && dr != 0 && m.from_index() % 2 == 1 {
                return false;
            }
            captured.push(m.jumped_index());
            at = m.to_index();
            step = m.tail();
        }
        true
    }

    /// Single-step jump validation, used to probe candidate jumps during
    /// generation and as the head check of `check_jump`.
    fn check_jump_fast(&self, mov: &Move) -> bool {
        if !mov.jump_step() {
            return false;
        }
        if self.get(mov.from_index()) != self.whose_move {
            return false;
        }
        if self.get(mov.to_index()) != Empty {
            return false;
        }
        let over = self.get(mov.jumped_index());
        if over == self.whose_move || over == Empty {
            return false;
        }
        let dc = (col_of(mov.to_index()) - col_of(mov.from_index())).abs();
        let dr = (row_of(mov.to_index()) - row_of(mov.from_index())).abs();
        if dc > 2 || dr > 2 {
            return false;
        }
        if dc + dr == 3 {
            return false;
        }
        if dc != 0 && dr != 0 && mov.from_index() % 2 == 1 {
            return false;
        }
        true
    }

    /// All legal moves from the current position. If any jump exists for
    /// the mover, only jump chains are returned (capture is mandatory),
    /// and only maximal chains, not their prefixes. Works on a scratch
    /// copy, so the speculative jump exploration never touches this
    /// board's state or history.
    pub fn get_moves(&self) -> Vec<Move> {
        let mut scratch = self.clone();
        let mut out = Vec::new();
        scratch.get_moves_into(&mut out);
        out
    }

    /// `get_moves` into a reusable buffer. Intended for search scratch
    /// boards: jump enumeration applies and undoes candidate jumps on
    /// SELF (watchers are not notified), restoring it exactly.
    pub fn get_moves_into(&mut self, out: &mut Vec<Move>) {
        out.clear();
        if self.game_over {
            return;
        }
        if self.jump_possible() {
            for k in 0..NUM_SQUARES {
                let chains = self.jump_chains_from(k);
                out.extend(chains);
            }
        } else {
            for k in 0..NUM_SQUARES {
                self.simple_moves_from(k, out);
            }
        }
    }

    /// Add the legal simple moves out of square K, trying the 3x3
    /// neighborhood in fixed order: row offset -1..=1 outer, column
    /// offset -1..=1 inner. This order is observable in `get_moves`.
    fn simple_moves_from(&self, k: u8, out: &mut Vec<Move>) {
        for i in -1i8..=1 {
            for j in -1i8..=1 {
                let to = match sq(col_of(k) + j, row_of(k) + i) {
                    Some(t) => t,
                    None => continue,
                };
                let mov = Move::step(k, to);
                if self.legal_move_fast(&mov) {
                    out.push(mov);
                }
            }
        }
    }

    /// All maximal jump chains starting at square K, found by landing
    /// each first jump speculatively and recursing from the landing
    /// square. The board is restored exactly before returning.
    fn jump_chains_from(&mut self, k: u8) -> Vec<Move> {
        let mut chains = Vec::new();
        for i in -1i8..=1 {
            for j in -1i8..=1 {
                let to = match sq(col_of(k) + 2 * j, row_of(k) + 2 * i) {
                    Some(t) => t,
                    None => continue,
                };
                let mov = Move::step(k, to);
                if !self.check_jump_fast(&mov) {
                    continue;
                }
                let continuations = {
                    let mut applied = Applied::new(self, &mov);
                    // The application flipped the mover; flip back so the
                    // jumper itself is probed for continuations.
                    let board = applied.board();
                    board.whose_move = board.whose_move.opposite();
                    let next = board.jump_chains_from(to);
                    let board = applied.board();
                    board.whose_move = board.whose_move.opposite();
                    next
                };
                if continuations.is_empty() {
                    chains.push(mov);
                } else {
                    for next in continuations {
                        chains.push(mov.clone().then(next));
                    }
                }
            }
        }
        chains
    }

    /// True iff the mover has a jump from square K.
    pub fn jump_possible_at(&self, k: u8) -> bool {
        for i in -1i8..=1 {
            for j in -1i8..=1 {
                if let Some(to) = sq(col_of(k) + 2 * j, row_of(k) + 2 * i) {
                    if self.check_jump_fast(&Move::step(k, to)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// True iff the mover has a jump anywhere on the board.
    pub fn jump_possible(&self) -> bool {
        (0..NUM_SQUARES).any(|k| self.jump_possible_at(k))
    }

    fn move_possible_at(&self, k: u8) -> bool {
        for i in -1i8..=1 {
            for j in -1i8..=1 {
                if let Some(to) = sq(col_of(k) + j, row_of(k) + i) {
                    if self.legal_move_fast(&Move::step(k, to)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// True iff the mover has a simple move anywhere on the board.
    pub fn move_possible(&self) -> bool {
        (0..NUM_SQUARES).any(|k| self.move_possible_at(k))
    }

    fn is_move(&self) -> bool {
        self.jump_possible() || self.move_possible()
    }

    /// Apply MOV, assumed legal: vacate each origin, occupy each landing
    /// square, remove each jumped piece; then record the chain, give the
    /// other side the move, and recompute the terminal flag.
    pub fn make_move(&mut self, mov: &Move) {
        self.push_move(mov);
        self.notify();
    }

    /// Retract the most recently applied chain, restoring the exact prior
    /// position. Calling this with no applied moves is a caller bug.
    pub fn undo(&mut self) {
        self.pop_move();
        self.notify();
    }

    fn push_move(&mut self, mov: &Move) {
        self.move_list.push(mov.clone());
        let mover = self.whose_move;
        if !mov.is_jump() {
            self.set(mov.from_index(), Empty);
            self.set(mov.to_index(), mover);
        } else {
            for m in mov.steps() {
                self.set(m.from_index(), Empty);
                self.set(m.to_index(), mover);
                self.set(m.jumped_index(), Empty);
            }
        }
        self.whose_move = mover.opposite();
        self.game_over = !self.is_move();
    }

    fn pop_move(&mut self) {
        let mov = self
            .move_list
            .pop()
            .expect("undo with no applied moves");
        // Replay the individual steps in reverse order; each restores its
        // origin to the side that moved and its landing square to empty.
        let steps: Vec<&Move> = mov.steps().collect();
        for &m in steps.iter().rev() {
            self.undo_step(m);
        }
        self.whose_move = self.whose_move.opposite();
        // The retracted position had a legal move by construction.
        self.game_over = false;
    }

    fn undo_step(&mut self, m: &Move) {
        // The mover has not been flipped back yet: the side that made this
        // step is the opposite of the current mover, and any jumped piece
        // belonged to the current mover.
        let mover = self.whose_move.opposite();
        let victim = self.whose_move;
        if !m.is_jump() {
            self.set(m.from_index(), mover);
            self.set(m.to_index(), Empty);
        } else {
            self.set(m.from_index(), mover);
            self.set(m.jumped_index(), victim);
            self.set(m.to_index(), Empty);
        }
    }

    /// Subscribe a read-only view. The view starts synchronized with the
    /// current state and mirrors every later mutation through the
    /// board-change channel.
    pub fn watch(&mut self) -> BoardView {
        let (tx, rx) = unbounded();
        let snapshot = self.clone();
        self.watchers.push(tx);
        BoardView::new(snapshot, rx)
    }

    fn notify(&mut self) {
        if self.watchers.is_empty() {
            return;
        }
        let snapshot = self.clone();
        self.watchers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    /// Text form of the board, top row first. With LEGEND, row numbers run
    /// down the left edge and column letters beneath.
    pub fn to_text(&self, legend: bool) -> String {
        let mut out = String::new();
        if !legend {
            for r in (0..SIDE).rev() {
                out.push(' ');
                for c in 0..SIDE {
                    out.push(' ');
                    out.push(self.cells[(r * SIDE + c) as usize].short_name());
                }
                if r > 0 {
                    out.push('\n');
                }
            }
        } else {
            for r in (0..SIDE).rev() {
                out.push_str("  ");
                out.push((b'1' + r) as char);
                for c in 0..SIDE {
                    out.push(' ');
                    out.push(self.cells[(r * SIDE + c) as usize].short_name());
                }
                out.push('\n');
            }
            out.push_str("    a b c d e");
        }
        out
    }
}

impl Clone for Board {
    /// Deep copy of the position and history. Watchers stay with the
    /// original: a copy is a private scratch board.
    fn clone(&self) -> Board {
        Board {
            cells: self.cells,
            whose_move: self.whose_move,
            game_over: self.game_over,
            move_list: self.move_list.clone(),
            watchers: Vec::new(),
        }
    }
}

impl PartialEq for Board {
    /// Structural equality of the position: cells, mover, and terminal
    /// flag. History and watchers are not part of the position.
    fn eq(&self, other: &Board) -> bool {
        self.whose_move == other.whose_move
            && self.game_over == other.game_over
            && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(false))
    }
}

/// Applies a move on construction and retracts it on drop, so speculative
/// apply/undo pairs unwind on every exit path, including early pruning
/// breaks. Applications made through this guard reuse the board's journal
/// but do not notify watchers.
pub struct Applied<'a> {
    board: &'a mut Board,
}

impl<'a> Applied<'a> {
    pub fn new(board: &'a mut Board, mov: &Move) -> Applied<'a> {
        board.push_move(mov);
        Applied { board }
    }

    /// The board with the move applied.
    pub fn board(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Applied<'_> {
    fn drop(&mut self) {
        self.board.pop_move();
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
