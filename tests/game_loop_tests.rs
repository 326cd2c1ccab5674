//! Full games through the real-play loop.

use tabletop_engine::core::{GameState, PlayerId, PlayerResult};
use tabletop_engine::game::{DisplayHook, Game};
use tabletop_engine::games::connect4::{Connect4Model, Connect4State};
use tabletop_engine::games::hidden_duel::{
    HiddenDuelModel, HiddenDuelParams, HiddenDuelState, MaterialHeuristic,
};
use tabletop_engine::players::{Player, RandomPlayer};
use tabletop_engine::search::{MaxNSearchPlayer, TreeSearchConfig};

fn connect4_seats(
    a: Box<dyn Player<Connect4State>>,
    b: Box<dyn Player<Connect4State>>,
) -> Vec<Box<dyn Player<Connect4State>>> {
    vec![a, b]
}

#[test]
fn test_random_vs_random_connect4() {
    let mut game = Game::new(
        Connect4Model,
        Connect4State::default(),
        connect4_seats(
            Box::new(RandomPlayer::new(11)),
            Box::new(RandomPlayer::new(12)),
        ),
        1,
    )
    .unwrap();

    game.run().unwrap();

    let state = game.state();
    assert!(state.is_terminal());
    assert!(state.core().tick <= 42);
    assert_eq!(
        state.core().history().len() as u32,
        state.core().tick,
        "history must record every applied action"
    );

    // Exactly one winner, or a draw for everyone.
    let wins = PlayerId::all(2)
        .filter(|&p| game.results()[p] == PlayerResult::Win)
        .count();
    let draws = PlayerId::all(2)
        .filter(|&p| game.results()[p] == PlayerResult::Draw)
        .count();
    assert!(wins == 1 && draws == 0 || wins == 0 && draws == 2);
}

#[test]
fn test_search_beats_the_loop_plumbing() {
    // A depth-4 searcher against a random player through the full loop;
    // the point here is the loop handling boxed heterogeneous players.
    let config = TreeSearchConfig::default()
        .with_search_depth(4)
        .with_paranoid(true)
        .with_alpha_beta_pruning(true);
    let searcher = MaxNSearchPlayer::new(Connect4Model, config).unwrap();

    let mut game = Game::new(
        Connect4Model,
        Connect4State::default(),
        connect4_seats(Box::new(searcher), Box::new(RandomPlayer::new(4))),
        2,
    )
    .unwrap();

    game.run().unwrap();
    assert!(game.state().is_terminal());
}

#[test]
fn test_hidden_duel_through_the_loop() {
    let params = HiddenDuelParams {
        max_rounds: 30,
        ..HiddenDuelParams::default()
    };
    let searcher = MaxNSearchPlayer::new(HiddenDuelModel, TreeSearchConfig::default())
        .unwrap()
        .with_heuristic(Box::new(MaterialHeuristic))
        .unwrap();
    let players: Vec<Box<dyn Player<HiddenDuelState>>> =
        vec![Box::new(searcher), Box::new(RandomPlayer::new(8))];

    let mut game = Game::new(HiddenDuelModel, HiddenDuelState::new(params), players, 3).unwrap();
    game.run().unwrap();

    let state = game.state();
    assert!(state.is_terminal());
    assert!(state.core().turn_order.round_counter() <= 30);
    assert!(PlayerId::all(2).all(|p| game.results()[p].is_decided()));
}

#[test]
fn test_display_hook_sees_every_decision_and_the_end() {
    struct CountingHook {
        updates: std::rc::Rc<std::cell::Cell<u32>>,
    }

    impl DisplayHook<Connect4State> for CountingHook {
        fn update(&mut self, active: Option<PlayerId>, state: &Connect4State) {
            if let Some(player) = active {
                assert_eq!(player, state.current_player());
            }
            self.updates.set(self.updates.get() + 1);
        }
    }

    let updates = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut game = Game::new(
        Connect4Model,
        Connect4State::default(),
        connect4_seats(
            Box::new(RandomPlayer::new(21)),
            Box::new(RandomPlayer::new(22)),
        ),
        6,
    )
    .unwrap()
    .with_display_hook(Box::new(CountingHook {
        updates: updates.clone(),
    }));

    game.run().unwrap();

    // One update per applied action plus the terminal render.
    assert_eq!(updates.get(), game.state().core().tick + 1);
}
