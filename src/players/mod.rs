//! The player interface and baseline decision policies.
//!
//! A player receives a perspective-limited `Observation` and the legal
//! actions, and answers with an index into that action list. The loop calls
//! the lifecycle hooks (`initialize_player`, `finalize_player`) exactly once
//! per game, and `register_updated_observation` instead of `get_action`
//! when only one legal action exists.

use std::io::BufRead;

use crate::core::{
    Action, EngineError, ForwardModel, GameRng, GameState, Heuristic, Observation, Perspective,
    Result, ScoreHeuristic,
};

/// A decision-making agent for one seat at the table.
pub trait Player<S: GameState> {
    /// Choose an action by index into `actions`.
    ///
    /// An out-of-range index is fatal unless the player is interactive, in
    /// which case the loop re-queries.
    fn get_action(&mut self, observation: &Observation<S>, actions: &[S::Action])
        -> Result<usize>;

    /// Called once with the initial observation before the game starts.
    fn initialize_player(&mut self, _observation: &Observation<S>) {}

    /// Called once with the final observation after the game ends.
    fn finalize_player(&mut self, _observation: &Observation<S>) {}

    /// Called instead of `get_action` when the player has no real choice.
    fn register_updated_observation(&mut self, _observation: &Observation<S>) {}

    /// Interactive players get re-queried on invalid input instead of
    /// aborting the game.
    fn is_interactive(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "player"
    }
}

/// Uniform random baseline.
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl<S: GameState> Player<S> for RandomPlayer {
    fn get_action(
        &mut self,
        _observation: &Observation<S>,
        actions: &[S::Action],
    ) -> Result<usize> {
        if actions.is_empty() {
            return Err(EngineError::InvariantViolation(
                "player asked to choose from an empty action list".to_string(),
            ));
        }
        Ok(self.rng.gen_range_usize(0..actions.len()))
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// One-step lookahead: applies each action to a private copy and picks the
/// one the heuristic likes best, first-encountered ties winning.
pub struct OslaPlayer<M: ForwardModel> {
    model: M,
    heuristic: Box<dyn Heuristic<M::State>>,
    rng: GameRng,
}

impl<M: ForwardModel> OslaPlayer<M> {
    #[must_use]
    pub fn new(model: M, seed: u64) -> Self {
        Self {
            model,
            heuristic: Box::new(ScoreHeuristic),
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic<M::State>>) -> Self {
        self.heuristic = heuristic;
        self
    }
}

impl<M: ForwardModel> Player<M::State> for OslaPlayer<M> {
    fn get_action(
        &mut self,
        observation: &Observation<M::State>,
        actions: &[<M::State as GameState>::Action],
    ) -> Result<usize> {
        let root = observation.state.copy_for(Perspective::Full, &mut self.rng)?;
        let me = root.current_player();

        let mut best_idx = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (idx, action) in actions.iter().enumerate() {
            let mut child = root.clone();
            self.model.next(&mut child, action)?;
            let value = self.heuristic.evaluate(&child, me);
            if value > best_value {
                best_value = value;
                best_idx = idx;
            }
        }
        Ok(best_idx)
    }

    fn name(&self) -> &str {
        "osla"
    }
}

/// Console player: prints the labeled action list and reads an index from
/// stdin, retrying until a number is entered.
pub struct HumanConsolePlayer;

impl<S: GameState> Player<S> for HumanConsolePlayer {
    fn get_action(
        &mut self,
        observation: &Observation<S>,
        actions: &[S::Action],
    ) -> Result<usize> {
        if let Some(viewer) = observation.viewer.player() {
            println!("{viewer} to move:");
        }
        for (idx, action) in actions.iter().enumerate() {
            println!("  [{idx}] {}", action.label());
        }

        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            if stdin.lock().read_line(&mut line).is_err() {
                return Err(EngineError::InvariantViolation(
                    "console input closed while awaiting a move".to_string(),
                ));
            }
            match line.trim().parse::<usize>() {
                Ok(idx) => return Ok(idx),
                Err(_) => println!("enter an action index 0..{}", actions.len() - 1),
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "human"
    }
}
