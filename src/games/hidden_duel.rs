//! Hidden-rank duel: a compact partially observable two-player game.
//!
//! Each player fields a line of ranked pieces on a small board. Ranks are
//! hidden from the opponent until revealed by combat. Pieces move one
//! square orthogonally; moving onto an enemy piece resolves combat by rank
//! (higher wins, equal removes both, winner is revealed). A player with no
//! pieces left loses; hitting the round limit is a draw.
//!
//! The perspective copy is the interesting part: unrevealed enemy ranks are
//! not blanked but resampled without replacement from the pool of ranks the
//! viewer has not seen, so the copy stays statistically plausible. Pool
//! bookkeeping that does not reconcile raises an `InvariantViolation`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, CoreState, EngineError, ForwardModel, GameRng, GameState, Perspective, PlayerId,
    PlayerMap, PlayerResult, Result,
};

/// Board size, army size, and the draw horizon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HiddenDuelParams {
    pub width: u8,
    pub height: u8,
    /// Ranks 1..=ranks_per_player, one piece each per player.
    pub ranks_per_player: u8,
    /// Rounds before the game is declared a draw.
    pub max_rounds: u32,
}

impl Default for HiddenDuelParams {
    fn default() -> Self {
        Self {
            width: 4,
            height: 4,
            ranks_per_player: 4,
            max_rounds: 50,
        }
    }
}

/// A board coordinate. `Ord` so piece maps iterate in a stable order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub x: u8,
    pub y: u8,
}

impl Square {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// A ranked piece. `revealed` flips permanently once combat exposes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub owner: PlayerId,
    pub rank: u8,
    pub revealed: bool,
}

/// Move a piece one square orthogonally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MovePiece {
    pub from: Square,
    pub to: Square,
}

impl Action<HiddenDuelState> for MovePiece {
    fn execute(&self, state: &mut HiddenDuelState) -> bool {
        let Some(attacker) = state.pieces.remove(&self.from) else {
            return false;
        };
        match state.pieces.get(&self.to).copied() {
            None => {
                state.pieces.insert(self.to, attacker);
            }
            Some(defender) if defender.owner != attacker.owner => {
                // Combat reveals the survivor; equal ranks remove both.
                if attacker.rank > defender.rank {
                    state.pieces.insert(
                        self.to,
                        Piece {
                            revealed: true,
                            ..attacker
                        },
                    );
                } else if attacker.rank < defender.rank {
                    state.pieces.insert(
                        self.to,
                        Piece {
                            revealed: true,
                            ..defender
                        },
                    );
                } else {
                    state.pieces.remove(&self.to);
                }
            }
            Some(_) => {
                // Own piece on the target square; restore and refuse.
                state.pieces.insert(self.from, attacker);
                return false;
            }
        }
        true
    }

    fn label(&self) -> String {
        format!(
            "move ({},{}) -> ({},{})",
            self.from.x, self.from.y, self.to.x, self.to.y
        )
    }
}

/// Hidden-rank duel state: engine core plus the piece map.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct HiddenDuelState {
    core: CoreState<MovePiece>,
    params: HiddenDuelParams,
    pieces: BTreeMap<Square, Piece>,
}

impl HiddenDuelState {
    #[must_use]
    pub fn new(params: HiddenDuelParams) -> Self {
        Self {
            core: CoreState::new(2),
            params,
            pieces: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn params(&self) -> &HiddenDuelParams {
        &self.params
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.pieces.get(&square)
    }

    /// All pieces in stable square order.
    pub fn pieces(&self) -> impl Iterator<Item = (&Square, &Piece)> {
        self.pieces.iter()
    }

    #[must_use]
    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.pieces.values().filter(|p| p.owner == player).count()
    }

    fn in_bounds(&self, x: i16, y: i16) -> bool {
        x >= 0 && y >= 0 && x < i16::from(self.params.width) && y < i16::from(self.params.height)
    }
}

impl Default for HiddenDuelState {
    fn default() -> Self {
        Self::new(HiddenDuelParams::default())
    }
}

impl GameState for HiddenDuelState {
    type Action = MovePiece;

    fn core(&self) -> &CoreState<MovePiece> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoreState<MovePiece> {
        &mut self.core
    }

    fn copy_for(&self, viewer: Perspective, rng: &mut GameRng) -> Result<Self> {
        let Some(viewer) = viewer.player() else {
            return Ok(self.clone());
        };

        // Pool of ranks the viewer has not seen, in stable board order.
        let mut pool: Vec<u8> = self
            .pieces
            .values()
            .filter(|p| p.owner != viewer && !p.revealed)
            .map(|p| p.rank)
            .collect();

        let mut copy = self.clone();
        for piece in copy.pieces.values_mut() {
            if piece.owner != viewer && !piece.revealed {
                // Position and owner stay accurate; only the rank is
                // redrawn from the remaining hidden pool.
                let idx = rng.gen_range_usize(0..pool.len());
                piece.rank = pool.swap_remove(idx);
            }
        }
        if !pool.is_empty() {
            return Err(EngineError::InvariantViolation(
                "hidden rank pool not fully reassigned in perspective copy".to_string(),
            ));
        }
        Ok(copy)
    }
}

/// Hidden-rank duel rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct HiddenDuelModel;

impl ForwardModel for HiddenDuelModel {
    type State = HiddenDuelState;

    fn initialize(&self, state: &mut HiddenDuelState) {
        state.pieces.clear();
        let top = state.params.height - 1;
        for rank in 1..=state.params.ranks_per_player {
            let x = (rank - 1) % state.params.width;
            state.pieces.insert(
                Square::new(x, 0),
                Piece {
                    owner: PlayerId::new(0),
                    rank,
                    revealed: false,
                },
            );
            state.pieces.insert(
                Square::new(x, top),
                Piece {
                    owner: PlayerId::new(1),
                    rank,
                    revealed: false,
                },
            );
        }
    }

    fn compute_available_actions(&self, state: &HiddenDuelState) -> Vec<MovePiece> {
        if state.is_terminal() {
            return Vec::new();
        }
        let mover = state.current_player();
        let mut actions = Vec::new();
        // BTreeMap iteration plus a fixed direction order keeps this stable.
        for (&from, piece) in &state.pieces {
            if piece.owner != mover {
                continue;
            }
            for (dx, dy) in [(0i16, 1i16), (1, 0), (0, -1), (-1, 0)] {
                let x = i16::from(from.x) + dx;
                let y = i16::from(from.y) + dy;
                if !state.in_bounds(x, y) {
                    continue;
                }
                let to = Square::new(x as u8, y as u8);
                match state.pieces.get(&to) {
                    Some(other) if other.owner == mover => {}
                    _ => actions.push(MovePiece { from, to }),
                }
            }
        }
        actions
    }

    fn apply(&self, state: &mut HiddenDuelState, action: &MovePiece) -> Result<()> {
        if !action.execute(state) {
            return Err(EngineError::InvariantViolation(format!(
                "legal action {} failed to execute",
                action.label()
            )));
        }

        let eliminated = PlayerId::all(2).find(|&p| state.piece_count(p) == 0);
        if let Some(loser) = eliminated {
            let results = PlayerMap::new(2, |p| {
                if p == loser {
                    PlayerResult::Lose
                } else {
                    PlayerResult::Win
                }
            });
            state.core_mut().end_game(results);
            return Ok(());
        }

        state.core_mut().turn_order.end_turn();
        if state.core().turn_order.round_counter() >= state.params.max_rounds {
            state
                .core_mut()
                .end_game(PlayerMap::with_value(2, PlayerResult::Draw));
        }
        Ok(())
    }
}

/// Material heuristic: normalized rank-sum difference, bounded to [-1, 1].
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialHeuristic;

impl crate::core::Heuristic<HiddenDuelState> for MaterialHeuristic {
    fn evaluate(&self, state: &HiddenDuelState, player: PlayerId) -> f64 {
        let total: u32 = (1..=u32::from(state.params.ranks_per_player)).sum();
        let mut own = 0u32;
        let mut theirs = 0u32;
        for piece in state.pieces.values() {
            if piece.owner == player {
                own += u32::from(piece.rank);
            } else {
                theirs += u32::from(piece.rank);
            }
        }
        (f64::from(own) - f64::from(theirs)) / f64::from(total)
    }

    fn min_value(&self) -> f64 {
        -1.0
    }

    fn max_value(&self) -> f64 {
        1.0
    }
}
