use crossbeam_channel::Receiver;

use std::fmt;

use crate::board::Board;
use crate::moves::Move;
use crate::types::PieceColor;

/// A read-only view of a board, obtained from `Board::watch`.
///
/// The view holds its own mirror of the watched board and updates it from
/// the board-change channel on `refresh`. It exposes only query
/// operations; there is no way to mutate the watched board through it.
pub struct BoardView {
    state: Board,
    events: Receiver<Board>,
}

impl BoardView {
    pub(crate) fn new(state: Board, events: Receiver<Board>) -> BoardView {
        BoardView { state, events }
    }

    /// Drain pending change notifications into the mirror. Returns true
    /// iff the watched board has changed since the last refresh.
    pub fn refresh(&mut self) -> bool {
        let mut changed = false;
        while let Ok(board) = self.events.try_recv() {
            self.state = board;
            changed = true;
        }
        changed
    }

    pub fn get(&self, k: u8) -> PieceColor {
        self.state.get(k)
    }

    pub fn get_square(&self, c: char, r: char) -> PieceColor {
        self.state.get_square(c, r)
    }

    pub fn whose_move(&self) -> PieceColor {
        self.state.whose_move()
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over()
    }

    pub fn legal_move(&self, mov: &Move) -> bool {
        self.state.legal_move(mov)
    }

    pub fn get_moves(&self) -> Vec<Move> {
        self.state.get_moves()
    }

    pub fn jump_possible(&self) -> bool {
        self.state.jump_possible()
    }

    pub fn move_possible(&self) -> bool {
        self.state.move_possible()
    }

    pub fn to_text(&self, legend: bool) -> String {
        self.state.to_text(legend)
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.state, f)
    }
}
