//! # tabletop-engine
//!
//! A research testbed engine for turn-based multi-player board games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: The engine is generic over the `GameState` /
//!    `ForwardModel` / `Action` capability traits and never inspects
//!    concrete game types.
//!
//! 2. **N-Player First**: States carry a `player_count`; results, scores,
//!    and search value vectors are per-player. Nothing assumes 2 players.
//!
//! 3. **Perspective Copies Over Shared State**: Players and search see
//!    `Observation`s - perspective-limited copies with hidden information
//!    resampled - never the authoritative state.
//!
//! ## Architecture
//!
//! - **Stateless Rules**: A `ForwardModel` holds no game data; one model
//!   drives the real game and every search clone.
//! - **Persistent History**: Action history is an `im` persistent vector,
//!   so state cloning inside the search stays cheap.
//! - **Pruning As Pure Speedup**: Paranoid alpha-beta changes node counts,
//!   never the chosen move.
//!
//! ## Modules
//!
//! - `core`: Player IDs, results, RNG, turn order, state, actions, forward
//!   model, heuristics, errors
//! - `players`: The `Player` trait plus random / one-step-lookahead /
//!   console baselines
//! - `search`: MaxN and paranoid depth-limited tree search
//! - `game`: The real-play game loop
//! - `games`: Bundled reference games (Connect-4, hidden-rank duel)

pub mod core;
pub mod game;
pub mod games;
pub mod players;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    fingerprint, Action, ActionRecord, CoreState, EngineError, ForwardModel, GameRng, GameState,
    GameStatus, Heuristic, Observation, Perspective, PlayerId, PlayerMap, PlayerResult, Result,
    ScoreHeuristic, TurnOrder,
};

pub use crate::game::{DisplayHook, Game};

pub use crate::players::{HumanConsolePlayer, OslaPlayer, Player, RandomPlayer};

pub use crate::search::{MaxNSearchPlayer, SearchBudget, SearchStats, TreeSearchConfig};
