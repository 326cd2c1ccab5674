//! Forward model: the stateless rule engine.
//!
//! Games implement `initialize`, `compute_available_actions`, and `apply`;
//! the trait provides the guarded `setup` and `next` entry points every
//! caller (game loop and search alike) goes through. The model holds no
//! game data itself - it operates only on the state passed to it, so one
//! model instance can drive the real game and any number of search clones.

use super::action::ActionRecord;
use super::error::{EngineError, Result};
use super::state::{GameState, GameStatus};

/// Stateless rule engine for one game.
///
/// ## Implementation notes
///
/// - `compute_available_actions` must return a stable, reproducible order
///   for a fixed state; deterministic search and pruning equivalence depend
///   on it. It is empty only at a terminal state.
/// - `apply` performs the action, advances the turn order, and ends the
///   game (via `CoreState::end_game`) when the rules say so.
pub trait ForwardModel {
    type State: GameState;

    /// Establish the initial configuration per the game rules.
    ///
    /// Called once through `setup`; does not need to guard against
    /// re-entry itself.
    fn initialize(&self, state: &mut Self::State);

    /// Enumerate legal actions for the active player, in stable order.
    fn compute_available_actions(
        &self,
        state: &Self::State,
    ) -> Vec<<Self::State as GameState>::Action>;

    /// Apply one legal action: mutate the state, advance turn order, update
    /// terminal status and results if the game ends.
    fn apply(
        &self,
        state: &mut Self::State,
        action: &<Self::State as GameState>::Action,
    ) -> Result<()>;

    /// Set up a fresh state.
    ///
    /// Calling this twice on a live state without a reset is a
    /// configuration error.
    fn setup(&self, state: &mut Self::State) -> Result<()> {
        if state.core().is_initialized() {
            return Err(EngineError::Configuration(
                "setup called twice on a live state without reset".to_string(),
            ));
        }
        self.initialize(state);
        let core = state.core_mut();
        core.mark_initialized();
        core.status = GameStatus::Running;
        Ok(())
    }

    /// Advance the state by one action.
    ///
    /// Fails with `IllegalAction` if the action is not in the current legal
    /// set; otherwise records it in the history and applies it.
    fn next(
        &self,
        state: &mut Self::State,
        action: &<Self::State as GameState>::Action,
    ) -> Result<()> {
        use crate::core::Action;

        let legal = self.compute_available_actions(state);
        if !legal.iter().any(|a| a == action) {
            return Err(EngineError::IllegalAction {
                action: action.label(),
            });
        }

        let record = ActionRecord::new(
            state.current_player(),
            action.clone(),
            state.core().turn_order.round_counter(),
            state.core().tick,
        );
        state.core_mut().record(record);

        self.apply(state, action)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        state.is_terminal()
    }
}
