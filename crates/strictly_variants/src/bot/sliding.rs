//! Sliding-window bot: win and block checks run on the post-eviction board.

use super::owns_line;
use crate::games::{Player, Position, SlidingEngine, Square};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

pub(super) fn choose(engine: &SlidingEngine, player: Player, rng: &mut StdRng) -> Option<Position> {
    let empty = Position::valid_moves(engine.board());
    for marker in [player, player.opponent()] {
        if let Some(pos) = empty
            .iter()
            .copied()
            .find(|pos| wins_after_eviction(engine, *pos, marker))
        {
            return Some(pos);
        }
    }
    empty.choose(rng).copied()
}

/// Places tentatively, drops the mover's expiring piece, then checks lines.
fn wins_after_eviction(engine: &SlidingEngine, pos: Position, player: Player) -> bool {
    let mut simulated = engine.board().clone();
    simulated.set(pos, Square::Occupied(player));
    if let Some(old) = engine.expiring(player) {
        simulated.set(old, Square::Empty);
    }
    owns_line(&simulated, player)
}
