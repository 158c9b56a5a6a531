//! First-class invariants for the variant engines.
//!
//! Invariants are logical properties that must hold after every applied move.
//! Contracts check them in debug builds; each one is also testable on its own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants over the same state.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod balanced_markers;
pub mod move_window;
pub mod settled_pieces;
pub mod sub_boards;

pub use balanced_markers::BalancedMarkersInvariant;
pub use move_window::{HistoryMatchesBoardInvariant, MoveWindowInvariant};
pub use settled_pieces::SettledPiecesInvariant;
pub use sub_boards::{ActiveBoardOpenInvariant, SubOutcomesConsistentInvariant};

/// Sliding-window invariants checked after every placement.
pub type SlidingInvariants = (MoveWindowInvariant, HistoryMatchesBoardInvariant);

/// Ultimate invariants checked after every placement.
pub type UltimateInvariants = (ActiveBoardOpenInvariant, SubOutcomesConsistentInvariant);
