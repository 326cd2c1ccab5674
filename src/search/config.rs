//! Tree search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, Result};

/// Optional resource limits on one search call.
///
/// When a limit trips mid-search, the affected subtrees are evaluated with
/// the heuristic at their current frontier rather than abandoned, so the
/// search always returns a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Stop expanding after this many visited nodes.
    pub max_nodes: Option<u64>,
    /// Stop expanding after this much wall-clock time.
    pub max_time: Option<Duration>,
}

impl SearchBudget {
    /// No limits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }
}

/// Configuration for `MaxNSearchPlayer`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeSearchConfig {
    /// Lookahead depth in plies.
    pub search_depth: u32,
    /// Prune with alpha-beta bounds. Only meaningful in paranoid mode;
    /// ignored under per-player MaxN values.
    pub alpha_beta_pruning: bool,
    /// Collapse opponents into one adversary minimizing the root player's
    /// value. Required for alpha-beta pruning.
    pub paranoid: bool,
    /// Seed for the search's private RNG (determinization of hidden
    /// information).
    pub seed: u64,
    pub budget: SearchBudget,
}

impl Default for TreeSearchConfig {
    fn default() -> Self {
        Self {
            search_depth: 4,
            alpha_beta_pruning: false,
            paranoid: false,
            seed: 0,
            budget: SearchBudget::unlimited(),
        }
    }
}

impl TreeSearchConfig {
    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_alpha_beta_pruning(mut self, enabled: bool) -> Self {
        self.alpha_beta_pruning = enabled;
        self
    }

    pub fn with_paranoid(mut self, enabled: bool) -> Self {
        self.paranoid = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Reject configurations the search cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.search_depth == 0 {
            return Err(EngineError::Configuration(
                "search_depth must be at least 1".to_string(),
            ));
        }
        if self.budget.max_nodes == Some(0) {
            return Err(EngineError::Configuration(
                "max_nodes budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeSearchConfig::default();
        assert_eq!(config.search_depth, 4);
        assert!(!config.alpha_beta_pruning);
        assert!(!config.paranoid);
        assert_eq!(config.budget, SearchBudget::unlimited());
        config.validate().unwrap();
    }

    #[test]
    fn test_builder() {
        let config = TreeSearchConfig::default()
            .with_search_depth(6)
            .with_paranoid(true)
            .with_alpha_beta_pruning(true)
            .with_seed(99)
            .with_budget(SearchBudget {
                max_nodes: Some(10_000),
                max_time: Some(Duration::from_millis(50)),
            });

        assert_eq!(config.search_depth, 6);
        assert!(config.paranoid);
        assert!(config.alpha_beta_pruning);
        assert_eq!(config.seed, 99);
        assert_eq!(config.budget.max_nodes, Some(10_000));
        config.validate().unwrap();
    }

    #[test]
    fn test_serde_round_trip() {
        let config = TreeSearchConfig::default()
            .with_search_depth(5)
            .with_alpha_beta_pruning(true)
            .with_budget(SearchBudget {
                max_nodes: Some(500),
                max_time: Some(Duration::from_millis(20)),
            });

        let json = serde_json::to_string(&config).unwrap();
        let back: TreeSearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = TreeSearchConfig::default()
            .with_search_depth(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_zero_node_budget_rejected() {
        let config = TreeSearchConfig::default().with_budget(SearchBudget {
            max_nodes: Some(0),
            max_time: None,
        });
        assert!(config.validate().is_err());
    }
}
