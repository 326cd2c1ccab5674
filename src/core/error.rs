//! Error types for the engine core.
//!
//! The taxonomy is deliberately small: every variant indicates a logic error
//! in a caller, a rule set, or the engine itself, and none of them is
//! retried. Search budget exhaustion is not an error at all; it is reported
//! through `SearchStats`.

use thiserror::Error;

/// Fatal engine errors.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// An action outside the current legal set was applied.
    #[error("illegal action {action}: not in the current legal set")]
    IllegalAction { action: String },

    /// Invalid configuration, rejected before any simulation starts.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An engine or rule-set invariant was broken mid-game.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for Results using the engine's error type.
pub type Result<T> = std::result::Result<T, EngineError>;
