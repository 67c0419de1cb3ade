use crate::board::{Board, Color, Placement};
use crate::random::pick_random;
use rand::Rng;

/// Plays uniformly random legal placements on `board`, starting with `to_move`, until the side
/// to move has none left. Returns the winner, which is the other side.
pub fn rollout<B: Board, R: Rng + ?Sized>(board: &mut B, to_move: Color, rng: &mut R) -> Color {
    let mut side = to_move;
    loop {
        let cells = board.legal_cells(side);
        let Some(&cell) = pick_random(&cells, rng) else {
            return side.opponent();
        };
        let legality = board.place(Placement::new(cell, side));
        debug_assert!(legality.is_legal(), "BUG: board rejected a cell it listed as legal");
        side = side.opponent();
    }
}
