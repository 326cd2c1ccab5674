//! Game state: the game-agnostic core and the per-game state trait.
//!
//! ## CoreState
//!
//! Every concrete game state embeds a `CoreState`: status, turn order,
//! per-player results, action count, and the action history. Cloning is
//! cheap because the history is an `im` persistent vector, which matters
//! when the search clones a state per node.
//!
//! ## GameState
//!
//! The capability trait the engine is generic over. A game supplies its
//! action type, access to the embedded core, a perspective-limited copy,
//! and a per-player score. All mutation goes through the `ForwardModel`.
//!
//! ## Perspective and Observation
//!
//! `Perspective::Full` yields a complete deep copy (used by search, which
//! must see the state it is determinizing from). `Perspective::Player(p)`
//! yields a copy with information hidden from `p` redacted - for hidden
//! information games, resampled so the copy stays statistically plausible
//! rather than blanked.

use std::fmt;
use std::hash::{Hash, Hasher};

use im::Vector;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::error::Result;
use super::player::{PlayerId, PlayerMap, PlayerResult};
use super::rng::GameRng;
use super::turn_order::TurnOrder;

/// Lifecycle of a game state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Created but not yet set up by the forward model.
    #[default]
    Pending,
    Running,
    Terminal,
}

/// Viewer of a perspective-limited copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perspective {
    /// Everything visible; the copy is deep-equal to the original.
    Full,
    /// Information hidden from this player is redacted/resampled.
    Player(PlayerId),
}

impl Perspective {
    /// The viewing player, if any.
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Perspective::Full => None,
            Perspective::Player(p) => Some(p),
        }
    }
}

/// Game-agnostic state core embedded in every concrete game state.
#[derive(Clone, Debug)]
pub struct CoreState<A: Clone> {
    pub status: GameStatus,
    pub turn_order: TurnOrder,
    pub results: PlayerMap<PlayerResult>,

    /// Total actions applied since setup.
    pub tick: u32,

    initialized: bool,
    history: Vector<ActionRecord<A>>,
}

impl<A: Clone> CoreState<A> {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            status: GameStatus::Pending,
            turn_order: TurnOrder::new(player_count),
            results: PlayerMap::with_default(player_count),
            tick: 0,
            initialized: false,
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.results.player_count()
    }

    /// Whether `setup` has already run on this state.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Marks the state as live. Called by `ForwardModel::setup`.
    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Clear all bookkeeping so the state can be set up again.
    pub fn reset(&mut self) {
        self.status = GameStatus::Pending;
        self.turn_order.reset();
        self.results = PlayerMap::with_default(self.player_count());
        self.tick = 0;
        self.initialized = false;
        self.history = Vector::new();
    }

    /// Append an action to the history. Called by `ForwardModel::next`.
    pub fn record(&mut self, record: ActionRecord<A>) {
        self.history.push_back(record);
        self.tick += 1;
    }

    /// Every action applied since setup, in order.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord<A>> {
        &self.history
    }

    /// Mark the game over with the given per-player results.
    pub fn end_game(&mut self, results: PlayerMap<PlayerResult>) {
        self.status = GameStatus::Terminal;
        self.results = results;
    }
}

// Equality and hashing skip the history: two states reached by different
// action sequences (transpositions) compare equal when the rest of the
// state matches.
impl<A: Clone> PartialEq for CoreState<A> {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status
            && self.turn_order == other.turn_order
            && self.results == other.results
            && self.tick == other.tick
            && self.initialized == other.initialized
    }
}

impl<A: Clone> Eq for CoreState<A> {}

impl<A: Clone> Hash for CoreState<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.status.hash(state);
        self.turn_order.hash(state);
        self.results.hash(state);
        self.tick.hash(state);
        self.initialized.hash(state);
    }
}

/// The capability set every game state implements.
///
/// The engine is generic over this trait and never inspects concrete game
/// types. Mutation happens exclusively through the `ForwardModel`.
pub trait GameState: Clone + PartialEq + Hash + fmt::Debug {
    /// The game's action type.
    type Action: Action<Self>;

    fn core(&self) -> &CoreState<Self::Action>;

    fn core_mut(&mut self) -> &mut CoreState<Self::Action>;

    /// Perspective-limited copy.
    ///
    /// `Perspective::Full` must be deep-equal to `self`. For a player
    /// viewer, shared information is copied as-is and hidden information is
    /// redacted; games with resampled hidden pools return an
    /// `InvariantViolation` if the pool bookkeeping does not reconcile.
    fn copy_for(&self, viewer: Perspective, rng: &mut GameRng) -> Result<Self>;

    /// This player's score. 0 while the game runs, the result value
    /// (win 1.0 / draw 0.5 / loss 0.0) once it is over.
    fn score(&self, player: PlayerId) -> f64 {
        self.core().results[player].value()
    }

    fn is_terminal(&self) -> bool {
        self.core().status == GameStatus::Terminal
    }

    fn player_count(&self) -> usize {
        self.core().player_count()
    }

    fn current_player(&self) -> PlayerId {
        self.core().turn_order.current_player()
    }
}

/// A player-scoped view of a game state: the redacted copy plus its viewer.
#[derive(Clone, Debug)]
pub struct Observation<S> {
    pub state: S,
    pub viewer: Perspective,
}

impl<S: GameState> Observation<S> {
    /// Build an observation of `state` for `viewer`.
    pub fn of(state: &S, viewer: Perspective, rng: &mut GameRng) -> Result<Self> {
        Ok(Self {
            state: state.copy_for(viewer, rng)?,
            viewer,
        })
    }
}

/// Hash a state down to a 64-bit fingerprint.
///
/// Used in tests to check transposition equality; states reached by
/// different action orders fingerprint identically because history is
/// excluded from state hashes.
#[must_use]
pub fn fingerprint<S: Hash>(state: &S) -> u64 {
    let mut hasher = FxHasher::default();
    state.hash(&mut hasher);
    hasher.finish()
}
