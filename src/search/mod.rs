//! Depth-limited tree search over the forward model.

pub mod config;
pub mod maxn;
pub mod stats;

pub use config::{SearchBudget, TreeSearchConfig};
pub use maxn::MaxNSearchPlayer;
pub use stats::SearchStats;
