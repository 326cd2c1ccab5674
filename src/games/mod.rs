//! Bundled games.
//!
//! Two reference implementations exercise the engine from opposite ends:
//! `connect4` is fully observable and deterministic, `hidden_duel` has
//! hidden information and a resampling perspective copy.

pub mod connect4;
pub mod hidden_duel;

pub use connect4::{Connect4LineHeuristic, Connect4Model, Connect4Params, Connect4State, Drop};
pub use hidden_duel::{
    HiddenDuelModel, HiddenDuelParams, HiddenDuelState, MaterialHeuristic, MovePiece, Piece,
    Square,
};
