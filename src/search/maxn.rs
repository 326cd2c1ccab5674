//! MaxN / paranoid tree search.
//!
//! The search player simulates forward from its observation on a private
//! cloned state, never touching the real game. Two backup rules:
//!
//! - **MaxN** (default): every node backs up a per-player value vector and
//!   the mover picks the child maximizing their own component, first
//!   encountered winning ties. No coalitions, no side payments.
//! - **Paranoid**: all opponents are collapsed into one adversary
//!   minimizing the root player's scalar value, which makes the tree a
//!   two-sided minimax and enables alpha-beta pruning.
//!
//! Pruning is a pure speed optimization: with `alpha_beta_pruning` on, the
//! chosen action and the backed-up root value are identical to the unpruned
//! search, only fewer nodes are visited. That holds because value updates
//! are strict improvements (first-best wins ties) and cut-off siblings can
//! only return bounds at or below the incumbent. The flag has no effect in
//! MaxN mode, where per-player vectors admit no sound scalar bound.

use std::time::Instant;

use log::debug;
use smallvec::SmallVec;

use crate::core::{
    EngineError, ForwardModel, GameRng, GameState, Heuristic, Observation, Perspective, PlayerId,
    Result, ScoreHeuristic,
};
use crate::players::Player;

use super::config::TreeSearchConfig;
use super::stats::SearchStats;

/// One value per player, inline for the common table sizes.
type ValueVector = SmallVec<[f64; 4]>;

/// Depth-limited MaxN / paranoid search player.
pub struct MaxNSearchPlayer<M: ForwardModel> {
    model: M,
    config: TreeSearchConfig,
    heuristic: Box<dyn Heuristic<M::State>>,
    rng: GameRng,
    stats: SearchStats,
}

impl<M: ForwardModel> std::fmt::Debug for MaxNSearchPlayer<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaxNSearchPlayer")
            .field("config", &self.config)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<M: ForwardModel> MaxNSearchPlayer<M> {
    /// Build a search player. Fails with a configuration error before any
    /// search runs if the config is unusable.
    pub fn new(model: M, config: TreeSearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = GameRng::new(config.seed);
        Ok(Self {
            model,
            config,
            heuristic: Box::new(ScoreHeuristic),
            rng,
            stats: SearchStats::default(),
        })
    }

    /// Replace the leaf heuristic. Rejects a misdeclared value range.
    pub fn with_heuristic(mut self, heuristic: Box<dyn Heuristic<M::State>>) -> Result<Self> {
        let (min, max) = (heuristic.min_value(), heuristic.max_value());
        if min.is_nan() || max.is_nan() || min > max {
            return Err(EngineError::Configuration(format!(
                "heuristic declares an empty value range [{min}, {max}]"
            )));
        }
        self.heuristic = heuristic;
        Ok(self)
    }

    /// Counters from the most recent `get_action` call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn evaluate_leaf(&self, state: &M::State, player: PlayerId) -> Result<f64> {
        let value = self.heuristic.evaluate(state, player);
        if value.is_nan() || value < self.heuristic.min_value() || value > self.heuristic.max_value()
        {
            return Err(EngineError::InvariantViolation(format!(
                "heuristic value {value} outside declared range [{}, {}]",
                self.heuristic.min_value(),
                self.heuristic.max_value()
            )));
        }
        Ok(value)
    }

    fn budget_exceeded(&mut self, deadline: Option<Instant>) -> bool {
        if let Some(max_nodes) = self.config.budget.max_nodes {
            if self.stats.nodes_visited >= max_nodes {
                self.stats.budget_exhausted = true;
                return true;
            }
        }
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                self.stats.budget_exhausted = true;
                return true;
            }
        }
        false
    }

    fn no_actions_error(state: &M::State) -> EngineError {
        EngineError::InvariantViolation(format!(
            "non-terminal state with no legal actions at tick {}",
            state.core().tick
        ))
    }

    /// MaxN backup: per-player value vector, mover maximizes their own
    /// component.
    fn maxn_value(
        &mut self,
        state: &M::State,
        depth: u32,
        deadline: Option<Instant>,
    ) -> Result<ValueVector> {
        self.stats.nodes_visited += 1;
        let players = state.player_count();

        if state.is_terminal() {
            return Ok(PlayerId::all(players).map(|p| state.score(p)).collect());
        }
        if depth == 0 || self.budget_exceeded(deadline) {
            let mut values = ValueVector::with_capacity(players);
            for player in PlayerId::all(players) {
                values.push(self.evaluate_leaf(state, player)?);
            }
            return Ok(values);
        }

        let actions = self.model.compute_available_actions(state);
        if actions.is_empty() {
            return Err(Self::no_actions_error(state));
        }

        let mover = state.current_player().index();
        let mut best = ValueVector::new();
        let mut best_own = f64::NEG_INFINITY;
        for action in &actions {
            let mut child = state.clone();
            self.model.next(&mut child, action)?;
            let values = self.maxn_value(&child, depth - 1, deadline)?;
            if values[mover] > best_own {
                best_own = values[mover];
                best = values;
            }
        }
        Ok(best)
    }

    /// Paranoid backup: scalar value for the root player, every other mover
    /// minimizes it. `alpha`/`beta` are fail-soft bounds, consulted only
    /// when pruning is enabled.
    fn paranoid_value(
        &mut self,
        state: &M::State,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        root_player: PlayerId,
        deadline: Option<Instant>,
    ) -> Result<f64> {
        self.stats.nodes_visited += 1;

        if state.is_terminal() {
            return Ok(state.score(root_player));
        }
        if depth == 0 || self.budget_exceeded(deadline) {
            return self.evaluate_leaf(state, root_player);
        }

        let actions = self.model.compute_available_actions(state);
        if actions.is_empty() {
            return Err(Self::no_actions_error(state));
        }

        let maximizing = state.current_player() == root_player;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for action in &actions {
            let mut child = state.clone();
            self.model.next(&mut child, action)?;
            let value =
                self.paranoid_value(&child, depth - 1, alpha, beta, root_player, deadline)?;
            if maximizing {
                if value > best {
                    best = value;
                }
                if self.config.alpha_beta_pruning {
                    alpha = alpha.max(best);
                    if best >= beta {
                        self.stats.prunes += 1;
                        break;
                    }
                }
            } else {
                if value < best {
                    best = value;
                }
                if self.config.alpha_beta_pruning {
                    beta = beta.min(best);
                    if best <= alpha {
                        self.stats.prunes += 1;
                        break;
                    }
                }
            }
        }
        Ok(best)
    }
}

impl<M: ForwardModel> Player<M::State> for MaxNSearchPlayer<M> {
    fn get_action(
        &mut self,
        observation: &Observation<M::State>,
        actions: &[<M::State as GameState>::Action],
    ) -> Result<usize> {
        let started = Instant::now();
        self.stats.reset();

        if actions.is_empty() {
            return Err(EngineError::InvariantViolation(
                "search asked to choose from an empty action list".to_string(),
            ));
        }
        if actions.len() == 1 {
            self.stats.time_us = started.elapsed().as_micros() as u64;
            return Ok(0);
        }

        // Determinize: the observation already has hidden information
        // resampled for this seat; a full copy of it is the search root.
        let root = observation
            .state
            .copy_for(Perspective::Full, &mut self.rng)?;
        let me = root.current_player();
        let depth = self.config.search_depth;
        let deadline = self
            .config
            .budget
            .max_time
            .and_then(|limit| started.checked_add(limit));

        self.stats.nodes_visited += 1;
        let mut best_idx = 0;
        let mut best = f64::NEG_INFINITY;

        if self.config.paranoid {
            let mut alpha = f64::NEG_INFINITY;
            for (idx, action) in actions.iter().enumerate() {
                let mut child = root.clone();
                self.model.next(&mut child, action)?;
                let value =
                    self.paranoid_value(&child, depth - 1, alpha, f64::INFINITY, me, deadline)?;
                if value > best {
                    best = value;
                    best_idx = idx;
                }
                if self.config.alpha_beta_pruning {
                    alpha = alpha.max(best);
                }
            }
        } else {
            let mover = me.index();
            for (idx, action) in actions.iter().enumerate() {
                let mut child = root.clone();
                self.model.next(&mut child, action)?;
                let values = self.maxn_value(&child, depth - 1, deadline)?;
                if values[mover] > best {
                    best = values[mover];
                    best_idx = idx;
                }
            }
        }

        self.stats.time_us = started.elapsed().as_micros() as u64;
        debug!(
            "search done: action {} value {:.4} nodes {} prunes {} {}us{}",
            best_idx,
            best,
            self.stats.nodes_visited,
            self.stats.prunes,
            self.stats.time_us,
            if self.stats.budget_exhausted {
                " (budget exhausted)"
            } else {
                ""
            }
        );
        Ok(best_idx)
    }

    fn name(&self) -> &str {
        if self.config.paranoid {
            "paranoid-search"
        } else {
            "maxn-search"
        }
    }
}
