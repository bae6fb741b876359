use crate::board::{Applied, Board};
use crate::moves::Move;

/// Pure perft node count.
/// Counts all move sequences from the current position down to `depth`,
/// restoring the board before returning.
pub fn perft(board: &mut Board, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(board: &mut Board, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 || board.game_over() {
            return 1;
        }

        let (buf, rest) = layers
            .split_first_mut()
            .expect("perft requires one buffer per remaining ply");

        board.get_moves_into(buf);

        let mut nodes = 0u64;
        for mov in buf.iter() {
            let mut applied = Applied::new(board, mov);
            nodes += inner(applied.board(), depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::new(); depth as usize];
    inner(board, depth, &mut layers[..])
}

