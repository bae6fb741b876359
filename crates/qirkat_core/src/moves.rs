use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{col, col_of, index, row, row_of, valid_square};

/// One step of a turn, optionally linked to the jump step that follows it.
///
/// A simple move is a single unlinked step. A multi-jump turn is a singly
/// linked chain of steps, each continuing from the previous landing square;
/// the chain exclusively owns its tail. Moves are immutable values compared
/// by their full from/to sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    from: u8,
    to: u8,
    tail: Option<Box<Move>>,
}

/// Rejection of unparsable move text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("bad square '{0}': expected a column a-e and a row 1-5")]
    BadSquare(String),
    #[error("a move must name at least two squares")]
    TooFewSquares,
}

impl Move {
    /// A single step between two squares. Whether it is a simple move or a
    /// jump is determined purely by the geometric span.
    pub fn step(from: u8, to: u8) -> Move {
        Move {
            from,
            to,
            tail: None,
        }
    }

    /// A zero-length glue link used only to join chain segments.
    pub fn vestigial(at: u8) -> Move {
        Move {
            from: at,
            to: at,
            tail: None,
        }
    }

    /// This chain with NEXT appended after its final step.
    pub fn then(mut self, next: Move) -> Move {
        self.append(next);
        self
    }

    fn append(&mut self, next: Move) {
        match self.tail {
            Some(ref mut t) => t.append(next),
            None => self.tail = Some(Box::new(next)),
        }
    }

    pub fn from_index(&self) -> u8 {
        self.from
    }

    /// Destination of this step (not of the whole chain).
    pub fn to_index(&self) -> u8 {
        self.to
    }

    /// Destination of the final step, i.e. where the moved piece ends up.
    pub fn end_index(&self) -> u8 {
        match self.tail {
            Some(ref t) => t.end_index(),
            None => self.to,
        }
    }

    /// The next jump step of this turn, if any.
    pub fn tail(&self) -> Option<&Move> {
        self.tail.as_deref()
    }

    /// The steps of this chain, in order, starting with this one.
    pub fn steps(&self) -> Steps<'_> {
        Steps { next: Some(self) }
    }

    /// True iff any step of this chain is a capturing jump.
    pub fn is_jump(&self) -> bool {
        self.steps().any(Move::jump_step)
    }

    /// True iff this single step spans two squares on some axis.
    pub(crate) fn jump_step(&self) -> bool {
        let dc = (col_of(self.to) - col_of(self.from)).abs();
        let dr = (row_of(self.to) - row_of(self.from)).abs();
        dc == 2 || dr == 2
    }

    /// The square jumped over by this step. Meaningful only for jump steps,
    /// where it is the midpoint of the span.
    pub fn jumped_index(&self) -> u8 {
        (self.from + self.to) / 2
    }

    /// True iff this step is a glue link that goes nowhere.
    pub fn is_vestigial(&self) -> bool {
        self.from == self.to
    }

    pub fn col0(&self) -> char {
        col(self.from)
    }
    pub fn row0(&self) -> char {
        row(self.from)
    }
    pub fn col1(&self) -> char {
        col(self.to)
    }
    pub fn row1(&self) -> char {
        row(self.to)
    }
}

/// Iterator over the links of a chain.
pub struct Steps<'a> {
    next: Option<&'a Move>,
}

impl<'a> Iterator for Steps<'a> {
    type Item = &'a Move;

    fn next(&mut self) -> Option<&'a Move> {
        let cur = self.next?;
        self.next = cur.tail.as_deref();
        Some(cur)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parse `"<col><row>-<col><row>[-<col><row>...]"`. A two-square form is
    /// a simple move or a single jump depending on its span; three or more
    /// squares necessarily form a jump chain.
    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        let mut squares = Vec::new();
        for part in s.split('-') {
            let chars: Vec<char> = part.chars().collect();
            if chars.len() != 2 || !valid_square(chars[0], chars[1]) {
                return Err(ParseMoveError::BadSquare(part.to_string()));
            }
            squares.push(index(chars[0], chars[1]));
        }
        if squares.len() < 2 {
            return Err(ParseMoveError::TooFewSquares);
        }

        // Build back to front so each link owns the one after it.
        let mut mov: Option<Move> = None;
        for w in squares.windows(2).rev() {
            mov = Some(Move {
                from: w[0],
                to: w[1],
                tail: mov.map(Box::new),
            });
        }
        Ok(mov.expect("two squares make at least one step"))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col0(), self.row0())?;
        for m in self.steps() {
            write!(f, "-{}{}", m.col1(), m.row1())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
