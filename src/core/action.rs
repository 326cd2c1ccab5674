//! Action trait and history records.
//!
//! Actions are immutable command objects executed against a game state.
//! Each game defines its own action type; the engine only needs value
//! equality, a stable hash, and a human-readable label, so both search
//! deduplication and tie-breaking stay deterministic.

use std::fmt;
use std::hash::Hash;

use super::player::PlayerId;

/// An immutable game action executable against state `S`.
///
/// Actions are cheap value types; most can derive `Copy` and cloning is
/// free.
pub trait Action<S>: Clone + PartialEq + Eq + Hash + fmt::Debug {
    /// Mutate the state according to this action.
    ///
    /// Returns false if the action could not be applied. After the forward
    /// model's legality check this indicates a rule-set bug, which the
    /// model surfaces as an invariant violation.
    fn execute(&self, state: &mut S) -> bool;

    /// Human-readable label for logs and interactive play.
    fn label(&self) -> String {
        format!("{self:?}")
    }
}

/// A recorded action with turn metadata, appended to the state's history by
/// the forward model. Used for deterministic replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Round in which the action was taken.
    pub round: u32,

    /// Global action count at the time the action was taken.
    pub tick: u32,
}

impl<A> ActionRecord<A> {
    #[must_use]
    pub fn new(player: PlayerId, action: A, round: u32, tick: u32) -> Self {
        Self {
            player,
            action,
            round,
            tick,
        }
    }
}
