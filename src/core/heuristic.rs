//! Heuristic evaluation of game states.
//!
//! A heuristic is a pure scalar estimator used when the search bottoms out
//! before a terminal state. It declares its own [min, max] range; the
//! search enforces that range and aborts with an invariant violation on any
//! out-of-range value rather than clamping.

use super::player::PlayerId;
use super::state::GameState;

/// Scalar evaluation of a state from one player's perspective.
pub trait Heuristic<S> {
    /// Evaluate `state` for `player`. Must stay within
    /// `[min_value(), max_value()]` and must not mutate anything.
    fn evaluate(&self, state: &S, player: PlayerId) -> f64;

    /// Lower bound of `evaluate`.
    fn min_value(&self) -> f64 {
        f64::NEG_INFINITY
    }

    /// Upper bound of `evaluate`.
    fn max_value(&self) -> f64 {
        f64::INFINITY
    }
}

/// Baseline heuristic: the game's own score for the player.
///
/// Mid-game this is 0 for every player (no result yet), so it only
/// differentiates leaves whose subtree reached a terminal state. Games that
/// want informed play before the horizon supply their own bounded
/// heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScoreHeuristic;

impl<S: GameState> Heuristic<S> for ScoreHeuristic {
    fn evaluate(&self, state: &S, player: PlayerId) -> f64 {
        state.score(player)
    }
}
