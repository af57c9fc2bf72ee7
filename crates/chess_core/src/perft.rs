use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts leaf nodes of the legal move tree `depth` plies deep.
/// One move buffer per ply is allocated up front and reused.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    fn walk(pos: &mut Position, buffers: &mut [Vec<Move>]) -> u64 {
        let Some((buf, rest)) = buffers.split_first_mut() else {
            return 1;
        };
        legal_moves_into(pos, buf);
        if rest.is_empty() {
            return buf.len() as u64;
        }
        let mut nodes = 0;
        for &mv in buf.iter() {
            let undo = pos.make_move(mv);
            nodes += walk(pos, rest);
            pos.unmake_move(mv, undo);
        }
        nodes
    }

    let mut buffers = vec![Vec::with_capacity(64); depth as usize];
    walk(pos, &mut buffers)
}
