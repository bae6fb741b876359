use qirkat_core::{Applied, Board, Move, PieceColor, SearchClock};

use crate::eval::{static_score, INFTY};

/// Outcome of one root search.
pub struct SearchReport {
    pub best_move: Option<Move>,
    pub score: i32,
    pub stopped: bool,
}

/// Pick the best chain for the side to move, searching DEPTH plies.
/// Must not be called on a finished game.
pub fn find_best_move(
    board: &Board,
    depth: u8,
    nodes: &mut u64,
    clock: &SearchClock,
) -> SearchReport {
    assert!(!board.game_over(), "cannot search a finished game");

    // All lookahead happens on a private scratch copy; the caller's board
    // is never touched.
    let mut scratch = board.clone();
    let sense: i32 = match scratch.whose_move() {
        PieceColor::White => 1,
        _ => -1,
    };

    let moves = scratch.get_moves();
    let mut best: Option<Move> = None;
    let mut best_val = if sense == 1 { -INFTY } else { INFTY };
    let mut alpha = -INFTY;
    let mut beta = INFTY;
    let mut stopped = false;

    for mov in &moves {
        if clock.expired() {
            stopped = true;
            break;
        }
        *nodes += 1;
        let response = {
            let mut applied = Applied::new(&mut scratch, mov);
            search(
                applied.board(),
                depth.saturating_sub(1),
                -sense,
                alpha,
                beta,
                nodes,
            )
        };
        if sense == 1 {
            // >= and <= so equal values prefer the later candidate.
            if response >= best_val {
                best = Some(mov.clone());
                best_val = response;
                alpha = alpha.max(response);
            }
        } else if response <= best_val {
            best = Some(mov.clone());
            best_val = response;
            beta = beta.min(response);
        }
        if beta <= alpha {
            break;
        }
    }

    SearchReport {
        best_move: best,
        score: best_val,
        stopped,
    }
}

/// Depth-limited alpha-beta. SENSE is +1 when this level maximizes
/// (White to act) and -1 when it minimizes. Returns the value only; the
/// chosen move is tracked by the root loop.
fn search(
    board: &mut Board,
    depth: u8,
    sense: i32,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 || board.game_over() {
        return static_score(board);
    }

    let mut moves = Vec::new();
    board.get_moves_into(&mut moves);

    let mut best_val = if sense == 1 { -INFTY } else { INFTY };
    for mov in &moves {
        *nodes += 1;
        // The guard retracts the move on every path out of this block, so
        // the pruning break below never leaves the board dirty.
        let response = {
            let mut applied = Applied::new(board, mov);
            search(applied.board(), depth - 1, -sense, alpha, beta, nodes)
        };
        if sense == 1 {
            if response >= best_val {
                best_val = response;
                alpha = alpha.max(response);
            }
        } else if response <= best_val {
            best_val = response;
            beta = beta.min(response);
        }
        if beta <= alpha {
            break;
        }
    }
    best_val
}
