//! Turn order tracking.
//!
//! Exactly one player is active at any point. Rounds wrap when the turn
//! owner cycles back to the first player.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Round-robin turn order with round and turn counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnOrder {
    player_count: u8,
    turn_owner: PlayerId,
    /// Turns taken in the current round.
    turn_counter: u32,
    round_counter: u32,
}

impl TurnOrder {
    /// Create a turn order for `player_count` players, player 0 first.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");
        Self {
            player_count: player_count as u8,
            turn_owner: PlayerId::new(0),
            turn_counter: 0,
            round_counter: 0,
        }
    }

    /// The currently active player.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_owner
    }

    /// Completed rounds.
    #[must_use]
    pub fn round_counter(&self) -> u32 {
        self.round_counter
    }

    /// Turns taken in the current round.
    #[must_use]
    pub fn turn_counter(&self) -> u32 {
        self.turn_counter
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count as usize
    }

    /// End the active player's turn and advance to the next player,
    /// wrapping into a new round after the last player.
    pub fn end_turn(&mut self) {
        let next = (self.turn_owner.0 + 1) % self.player_count;
        self.turn_owner = PlayerId::new(next);
        if next == 0 {
            self.round_counter += 1;
            self.turn_counter = 0;
        } else {
            self.turn_counter += 1;
        }
    }

    /// Reset to the start of the game.
    pub fn reset(&mut self) {
        self.turn_owner = PlayerId::new(0);
        self.turn_counter = 0;
        self.round_counter = 0;
    }
}
