//! Balanced markers: X moves first and the players alternate.

use super::super::{Player, Tally};
use super::Invariant;
use tracing::warn;

/// Invariant: X holds as many markers as O, or exactly one more.
///
/// Only meaningful where turn order is enforced, so the session checks it
/// rather than the engines.
pub struct BalancedMarkersInvariant;

impl<S: Tally> Invariant<S> for BalancedMarkersInvariant {
    fn holds(state: &S) -> bool {
        let x_count = state.marker_count(Player::X);
        let o_count = state.marker_count(Player::O);
        let valid = x_count == o_count || x_count == o_count + 1;
        if !valid {
            warn!(x_count, o_count, "Marker balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X holds as many markers as O or exactly one more"
    }
}
