//! Connect-4.
//!
//! Two players alternate dropping tokens into columns of a 7x6 (by default)
//! board; the first to line up four in a row in any direction wins, and a
//! full board without a line is a draw. Fully observable, so perspective
//! copies are plain deep copies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{
    Action, CoreState, EngineError, ForwardModel, GameRng, GameState, Perspective, PlayerId,
    PlayerMap, PlayerResult, Result,
};

/// Board dimensions and the line length needed to win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connect4Params {
    pub width: u8,
    pub height: u8,
    pub win_length: u8,
}

impl Default for Connect4Params {
    fn default() -> Self {
        Self {
            width: 7,
            height: 6,
            win_length: 4,
        }
    }
}

/// Drop a token into a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Drop {
    pub column: u8,
}

impl Action<Connect4State> for Drop {
    fn execute(&self, state: &mut Connect4State) -> bool {
        let mover = state.current_player();
        match state.landing_row(self.column) {
            Some(row) => {
                let idx = state.cell_index(self.column, row);
                state.cells[idx] = Some(mover);
                true
            }
            None => false,
        }
    }

    fn label(&self) -> String {
        format!("drop column {}", self.column)
    }
}

/// Connect-4 game state: the engine core plus the token grid.
///
/// Row 0 is the bottom row; tokens stack upwards.
#[derive(Clone, Debug, PartialEq, Hash)]
pub struct Connect4State {
    core: CoreState<Drop>,
    params: Connect4Params,
    cells: Vec<Option<PlayerId>>,
}

impl Connect4State {
    #[must_use]
    pub fn new(params: Connect4Params) -> Self {
        let cells = vec![None; usize::from(params.width) * usize::from(params.height)];
        Self {
            core: CoreState::new(2),
            params,
            cells,
        }
    }

    #[must_use]
    pub fn params(&self) -> &Connect4Params {
        &self.params
    }

    fn cell_index(&self, column: u8, row: u8) -> usize {
        usize::from(row) * usize::from(self.params.width) + usize::from(column)
    }

    /// Token at (column, row), if any.
    #[must_use]
    pub fn at(&self, column: u8, row: u8) -> Option<PlayerId> {
        self.cells[self.cell_index(column, row)]
    }

    /// Lowest empty row in a column, or None when the column is full.
    fn landing_row(&self, column: u8) -> Option<u8> {
        (0..self.params.height).find(|&row| self.at(column, row).is_none())
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Longest line through (column, row) for the token placed there.
    fn line_through(&self, column: u8, row: u8, owner: PlayerId) -> u8 {
        let mut best = 0u8;
        for (dx, dy) in [(1i16, 0i16), (0, 1), (1, 1), (1, -1)] {
            let mut count = 1u8;
            for dir in [1i16, -1] {
                let mut x = i16::from(column) + dx * dir;
                let mut y = i16::from(row) + dy * dir;
                while x >= 0
                    && y >= 0
                    && x < i16::from(self.params.width)
                    && y < i16::from(self.params.height)
                    && self.at(x as u8, y as u8) == Some(owner)
                {
                    count += 1;
                    x += dx * dir;
                    y += dy * dir;
                }
            }
            best = best.max(count);
        }
        best
    }
}

impl Default for Connect4State {
    fn default() -> Self {
        Self::new(Connect4Params::default())
    }
}

impl GameState for Connect4State {
    type Action = Drop;

    fn core(&self) -> &CoreState<Drop> {
        &self.core
    }

    fn core_mut(&mut self) -> &mut CoreState<Drop> {
        &mut self.core
    }

    // Fully observable: every perspective sees the true board.
    fn copy_for(&self, _viewer: Perspective, _rng: &mut GameRng) -> Result<Self> {
        Ok(self.clone())
    }
}

impl fmt::Display for Connect4State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.params.height).rev() {
            for column in 0..self.params.width {
                match self.at(column, row) {
                    Some(p) => write!(f, "{} ", p.0)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Connect-4 rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct Connect4Model;

impl ForwardModel for Connect4Model {
    type State = Connect4State;

    fn initialize(&self, state: &mut Connect4State) {
        state.cells.fill(None);
    }

    fn compute_available_actions(&self, state: &Connect4State) -> Vec<Drop> {
        if state.is_terminal() {
            return Vec::new();
        }
        // Ascending column order keeps enumeration stable.
        (0..state.params.width)
            .filter(|&column| state.landing_row(column).is_some())
            .map(|column| Drop { column })
            .collect()
    }

    fn apply(&self, state: &mut Connect4State, action: &Drop) -> Result<()> {
        let mover = state.current_player();
        if !action.execute(state) {
            return Err(EngineError::InvariantViolation(format!(
                "legal action {} failed to execute",
                action.label()
            )));
        }

        // The token just placed is the topmost in its column.
        let row = match state.landing_row(action.column) {
            Some(r) => r - 1,
            None => state.params.height - 1,
        };

        if state.line_through(action.column, row, mover) >= state.params.win_length {
            let results = PlayerMap::new(2, |p| {
                if p == mover {
                    PlayerResult::Win
                } else {
                    PlayerResult::Lose
                }
            });
            state.core_mut().end_game(results);
        } else if state.is_full() {
            state
                .core_mut()
                .end_game(PlayerMap::with_value(2, PlayerResult::Draw));
        } else {
            state.core_mut().turn_order.end_turn();
        }
        Ok(())
    }
}

/// Line-counting heuristic bounded to [-1, 1].
///
/// Scores every `win_length` window that is still open for a player (only
/// that player's tokens and empties) by the tokens already in it, and
/// normalizes the own-minus-opponent difference.
#[derive(Clone, Copy, Debug, Default)]
pub struct Connect4LineHeuristic;

impl Connect4LineHeuristic {
    fn window_score(state: &Connect4State, player: PlayerId) -> (u32, u32) {
        let params = state.params;
        let len = i16::from(params.win_length);
        let mut own = 0u32;
        let mut windows = 0u32;

        for column in 0..i16::from(params.width) {
            for row in 0..i16::from(params.height) {
                for (dx, dy) in [(1i16, 0i16), (0, 1), (1, 1), (1, -1)] {
                    let end_x = column + dx * (len - 1);
                    let end_y = row + dy * (len - 1);
                    if end_x < 0
                        || end_x >= i16::from(params.width)
                        || end_y < 0
                        || end_y >= i16::from(params.height)
                    {
                        continue;
                    }
                    windows += 1;

                    let mut mine = 0u32;
                    let mut open = true;
                    for step in 0..len {
                        let cell =
                            state.at((column + dx * step) as u8, (row + dy * step) as u8);
                        match cell {
                            Some(p) if p == player => mine += 1,
                            Some(_) => {
                                open = false;
                                break;
                            }
                            None => {}
                        }
                    }
                    if open {
                        own += mine;
                    }
                }
            }
        }
        (own, windows)
    }
}

impl crate::core::Heuristic<Connect4State> for Connect4LineHeuristic {
    fn evaluate(&self, state: &Connect4State, player: PlayerId) -> f64 {
        let opponent = PlayerId::new(1 - player.0);
        let (own, windows) = Self::window_score(state, player);
        let (theirs, _) = Self::window_score(state, opponent);
        if windows == 0 {
            return 0.0;
        }
        let scale = f64::from(windows) * f64::from(state.params.win_length);
        (f64::from(own) - f64::from(theirs)) / scale
    }

    fn min_value(&self) -> f64 {
        -1.0
    }

    fn max_value(&self) -> f64 {
        1.0
    }
}
