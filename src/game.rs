//! The game loop: real play from setup to finalization.
//!
//! `Game` owns the authoritative state, the forward model, and one player
//! per seat. Each step it observes the state for the active player, asks
//! them for an action index, and applies the chosen action through the
//! forward model. Players never see the true state in hidden information
//! games, only their perspective copy.

use std::fmt;

use log::{debug, info};

use crate::core::{
    Action, EngineError, ForwardModel, GameRng, GameState, Observation, Perspective, PlayerId,
    PlayerMap, PlayerResult, Result,
};
use crate::players::Player;

/// Render hook called with the authoritative state before every decision
/// and once after the game ends. Fire-and-forget: nothing the hook does
/// affects the engine.
pub trait DisplayHook<S> {
    /// `active` is the player about to decide, or `None` for the terminal
    /// render.
    fn update(&mut self, active: Option<PlayerId>, state: &S);
}

/// A running game: model, authoritative state, and seated players.
pub struct Game<M: ForwardModel> {
    model: M,
    state: M::State,
    players: Vec<Box<dyn Player<M::State>>>,
    rng: GameRng,
    display: Option<Box<dyn DisplayHook<M::State>>>,
    finalized: bool,
}

impl<M: ForwardModel> fmt::Debug for Game<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("player_count", &self.players.len())
            .field("finalized", &self.finalized)
            .finish_non_exhaustive()
    }
}

impl<M: ForwardModel> Game<M> {
    /// Seat `players`, set up `state`, and hand every player their initial
    /// observation.
    ///
    /// `seed` drives observation redaction only; game randomness lives in
    /// the forward model and player randomness in the players.
    pub fn new(
        model: M,
        mut state: M::State,
        players: Vec<Box<dyn Player<M::State>>>,
        seed: u64,
    ) -> Result<Self> {
        if players.len() != state.player_count() {
            return Err(EngineError::Configuration(format!(
                "{} players seated for a {}-player game",
                players.len(),
                state.player_count()
            )));
        }
        model.setup(&mut state)?;

        let mut game = Self {
            model,
            state,
            players,
            rng: GameRng::new(seed),
            display: None,
            finalized: false,
        };
        for seat in PlayerId::all(game.players.len()) {
            let obs = game.observe(seat)?;
            game.players[seat.index()].initialize_player(&obs);
        }
        Ok(game)
    }

    #[must_use]
    pub fn with_display_hook(mut self, hook: Box<dyn DisplayHook<M::State>>) -> Self {
        self.display = Some(hook);
        self
    }

    #[must_use]
    pub fn state(&self) -> &M::State {
        &self.state
    }

    /// Final results, available once the game is over.
    #[must_use]
    pub fn results(&self) -> &PlayerMap<PlayerResult> {
        &self.state.core().results
    }

    fn observe(&mut self, seat: PlayerId) -> Result<Observation<M::State>> {
        Observation::of(&self.state, Perspective::Player(seat), &mut self.rng)
    }

    /// Advance by one decision. Returns false once the game is over.
    pub fn step(&mut self) -> Result<bool> {
        if self.state.is_terminal() {
            self.finish()?;
            return Ok(false);
        }

        let actions = self.model.compute_available_actions(&self.state);
        if actions.is_empty() {
            return Err(EngineError::InvariantViolation(format!(
                "non-terminal state with no legal actions at tick {}",
                self.state.core().tick
            )));
        }

        let mover = self.state.current_player();
        let obs = self.observe(mover)?;
        if let Some(display) = &mut self.display {
            display.update(Some(mover), &self.state);
        }

        let player = &mut self.players[mover.index()];
        let chosen = if actions.len() == 1 {
            // Forced move: apply it without asking, but keep the player's
            // view of the game current.
            player.register_updated_observation(&obs);
            0
        } else {
            loop {
                let idx = player.get_action(&obs, &actions)?;
                if idx < actions.len() {
                    break idx;
                }
                if !player.is_interactive() {
                    return Err(EngineError::IllegalAction {
                        action: format!(
                            "action index {idx} out of range ({} legal)",
                            actions.len()
                        ),
                    });
                }
                debug!(
                    "player {} returned index {idx} of {}, re-querying",
                    player.name(),
                    actions.len()
                );
            }
        };

        debug!(
            "tick {}: {} plays {}",
            self.state.core().tick,
            self.players[mover.index()].name(),
            actions[chosen].label()
        );
        self.model.next(&mut self.state, &actions[chosen])?;

        if self.state.is_terminal() {
            self.finish()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Play until terminal and finalize every player.
    pub fn run(&mut self) -> Result<()> {
        while self.step()? {}
        Ok(())
    }

    /// Notify every player of the final state, exactly once. No state
    /// mutation happens at or after this point.
    fn finish(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }
        self.finalized = true;

        if let Some(display) = &mut self.display {
            display.update(None, &self.state);
        }
        for seat in PlayerId::all(self.players.len()) {
            let obs = self.observe(seat)?;
            self.players[seat.index()].finalize_player(&obs);
            info!(
                "game over: {} ({seat}) -> {:?}",
                self.players[seat.index()].name(),
                self.state.core().results[seat]
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::games::connect4::{Connect4Model, Connect4Params, Connect4State};
    use crate::players::RandomPlayer;

    #[derive(Clone, Default)]
    struct Lifecycle {
        initialized: Rc<Cell<u32>>,
        finalized: Rc<Cell<u32>>,
        decisions: Rc<Cell<u32>>,
        forced: Rc<Cell<u32>>,
    }

    /// Always plays action 0 and records its lifecycle calls.
    struct CountingPlayer {
        lifecycle: Lifecycle,
    }

    impl Player<Connect4State> for CountingPlayer {
        fn get_action(
            &mut self,
            _observation: &Observation<Connect4State>,
            _actions: &[crate::games::connect4::Drop],
        ) -> Result<usize> {
            self.lifecycle.decisions.set(self.lifecycle.decisions.get() + 1);
            Ok(0)
        }

        fn initialize_player(&mut self, _observation: &Observation<Connect4State>) {
            self.lifecycle.initialized.set(self.lifecycle.initialized.get() + 1);
        }

        fn finalize_player(&mut self, _observation: &Observation<Connect4State>) {
            self.lifecycle.finalized.set(self.lifecycle.finalized.get() + 1);
        }

        fn register_updated_observation(&mut self, _observation: &Observation<Connect4State>) {
            self.lifecycle.forced.set(self.lifecycle.forced.get() + 1);
        }
    }

    struct BadIndexPlayer {
        interactive: bool,
        attempts: u32,
    }

    impl Player<Connect4State> for BadIndexPlayer {
        fn get_action(
            &mut self,
            _observation: &Observation<Connect4State>,
            actions: &[crate::games::connect4::Drop],
        ) -> Result<usize> {
            self.attempts += 1;
            if self.attempts == 1 {
                Ok(actions.len() + 5)
            } else {
                Ok(0)
            }
        }

        fn is_interactive(&self) -> bool {
            self.interactive
        }
    }

    fn seats(players: Vec<Box<dyn Player<Connect4State>>>) -> Vec<Box<dyn Player<Connect4State>>> {
        players
    }

    #[test]
    fn test_full_random_game_terminates() {
        let mut game = Game::new(
            Connect4Model,
            Connect4State::default(),
            seats(vec![
                Box::new(RandomPlayer::new(1)),
                Box::new(RandomPlayer::new(2)),
            ]),
            7,
        )
        .unwrap();

        game.run().unwrap();

        assert!(game.state().is_terminal());
        // 7x6 board: at most 42 tokens.
        assert!(game.state().core().tick <= 42);
        let decided = PlayerId::all(2).all(|p| game.results()[p].is_decided());
        assert!(decided);
    }

    #[test]
    fn test_wrong_seat_count_rejected() {
        let err = Game::new(
            Connect4Model,
            Connect4State::default(),
            seats(vec![Box::new(RandomPlayer::new(1))]),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_lifecycle_and_forced_moves() {
        // One-column board: every move is forced, the game fills up to a
        // draw without ever calling get_action.
        let params = Connect4Params {
            width: 1,
            height: 4,
            win_length: 4,
        };
        let lifecycle = Lifecycle::default();
        let players: Vec<Box<dyn Player<Connect4State>>> = vec![
            Box::new(CountingPlayer {
                lifecycle: lifecycle.clone(),
            }),
            Box::new(CountingPlayer {
                lifecycle: lifecycle.clone(),
            }),
        ];

        let mut game = Game::new(Connect4Model, Connect4State::new(params), players, 3).unwrap();
        game.run().unwrap();
        // Extra steps after terminal must not re-finalize.
        assert!(!game.step().unwrap());

        assert!(game.state().is_terminal());
        assert_eq!(lifecycle.initialized.get(), 2);
        assert_eq!(lifecycle.finalized.get(), 2);
        assert_eq!(lifecycle.decisions.get(), 0);
        assert_eq!(lifecycle.forced.get(), 4);
        assert_eq!(game.results()[PlayerId::new(0)], PlayerResult::Draw);
    }

    #[test]
    fn test_bad_index_fatal_for_non_interactive() {
        let mut game = Game::new(
            Connect4Model,
            Connect4State::default(),
            seats(vec![
                Box::new(BadIndexPlayer {
                    interactive: false,
                    attempts: 0,
                }),
                Box::new(RandomPlayer::new(2)),
            ]),
            0,
        )
        .unwrap();

        let err = game.run().unwrap_err();
        assert!(matches!(err, EngineError::IllegalAction { .. }));
    }

    #[test]
    fn test_bad_index_requeried_for_interactive() {
        let mut game = Game::new(
            Connect4Model,
            Connect4State::default(),
            seats(vec![
                Box::new(BadIndexPlayer {
                    interactive: true,
                    attempts: 0,
                }),
                Box::new(RandomPlayer::new(2)),
            ]),
            0,
        )
        .unwrap();

        // First step survives the out-of-range index.
        assert!(game.step().unwrap());
        assert_eq!(game.state().core().tick, 1);
    }
}
