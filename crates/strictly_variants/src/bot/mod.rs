//! Heuristic opponents, one strategy per variant.
//!
//! Every strategy looks for an immediate win, then an immediate block, then
//! falls back to a positional or random choice. `None` means no legal move is
//! reachable; the session turns that into a forced draw.

mod classic;
mod gravity;
mod sliding;
mod ultimate;

use crate::games::{Board, MoveIntent, Player, Square, VariantEngine, rules::LINES};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

/// A bot playing one side of a session.
#[derive(Debug, Clone)]
pub struct Bot {
    player: Player,
    rng: StdRng,
}

impl Bot {
    /// Creates a bot seeded from the operating system.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a deterministic bot.
    pub fn seeded(player: Player, seed: u64) -> Self {
        Self {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Side this bot plays.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Picks a move for the current position, or `None` if nothing is playable.
    #[instrument(skip(self, engine), fields(player = %self.player, variant = %engine.variant()))]
    pub fn select(&mut self, engine: &VariantEngine) -> Option<MoveIntent> {
        let intent = match engine {
            VariantEngine::Classic(e) => {
                classic::choose(e.board(), self.player, &mut self.rng).map(MoveIntent::cell)
            }
            VariantEngine::SlidingWindow(e) => {
                sliding::choose(e, self.player, &mut self.rng).map(MoveIntent::cell)
            }
            VariantEngine::Gravity(e) => {
                gravity::choose(e.board(), self.player, &mut self.rng).map(MoveIntent::Column)
            }
            VariantEngine::Ultimate(e) => ultimate::choose(e, self.player, &mut self.rng)
                .map(|mv| MoveIntent::meta(mv.board, mv.cell)),
        };
        match &intent {
            Some(mv) => debug!(%mv, "Bot chose move"),
            None => debug!("Bot has no legal move"),
        }
        intent
    }
}

/// Returns true if `player` holds every cell of some line on `board`.
fn owns_line(board: &Board, player: Player) -> bool {
    LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == Square::Occupied(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::{Position, Variant};

    #[test]
    fn test_seeded_bots_agree() {
        let engine = VariantEngine::new(Variant::Classic, 6.0);
        let mut a = Bot::seeded(Player::O, 7);
        let mut b = Bot::seeded(Player::O, 7);
        assert_eq!(a.select(&engine), b.select(&engine));
    }

    #[test]
    fn test_owns_line() {
        let mut board = Board::new();
        for pos in [Position::TopRight, Position::Center, Position::BottomLeft] {
            board.set(pos, Square::Occupied(Player::O));
        }
        assert!(owns_line(&board, Player::O));
        assert!(!owns_line(&board, Player::X));
    }

    #[test]
    fn test_every_variant_yields_a_move() {
        for variant in [
            Variant::Classic,
            Variant::SlidingWindow,
            Variant::Gravity,
            Variant::Ultimate,
        ] {
            let engine = VariantEngine::new(variant, 6.0);
            let mut bot = Bot::seeded(Player::X, 1);
            assert!(bot.select(&engine).is_some(), "{variant} produced no move");
        }
    }
}
