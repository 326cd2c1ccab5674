//! Core engine types: players, RNG, errors, turn order, state, actions,
//! forward model, heuristics.
//!
//! This module contains the game-agnostic building blocks. Concrete games
//! implement the `GameState`/`ForwardModel`/`Action` traits rather than
//! modifying the core.

pub mod action;
pub mod error;
pub mod forward;
pub mod heuristic;
pub mod player;
pub mod rng;
pub mod state;
pub mod turn_order;

pub use action::{Action, ActionRecord};
pub use error::{EngineError, Result};
pub use forward::ForwardModel;
pub use heuristic::{Heuristic, ScoreHeuristic};
pub use player::{PlayerId, PlayerMap, PlayerResult};
pub use rng::GameRng;
pub use state::{fingerprint, CoreState, GameState, GameStatus, Observation, Perspective};
pub use turn_order::TurnOrder;
