//! Grid navigation with optional traffic-signal cells.
use crate::{Signal, SignalBootstrap};
use anyhow::Result;
use log::{info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Env, State, Step};

/// Actions of [`GridWorld`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridAct {
    /// Row - 1.
    Up,
    /// Row + 1.
    Down,
    /// Col - 1.
    Left,
    /// Col + 1.
    Right,
    /// Stay.
    Wait,
}

impl GridAct {
    /// All actions in index order.
    pub const ALL: [GridAct; 5] = [
        GridAct::Up,
        GridAct::Down,
        GridAct::Left,
        GridAct::Right,
        GridAct::Wait,
    ];

    /// Decodes an action index. Indices past the end read as [`GridAct::Wait`].
    pub fn from_index(act: Act) -> Self {
        Self::ALL.get(act).copied().unwrap_or(GridAct::Wait)
    }

    /// Index of the action.
    pub fn index(self) -> Act {
        self as Act
    }
}

/// Start cell of an episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GridStart {
    /// Always the given `(row, col)`.
    Fixed(usize, usize),

    /// A uniformly drawn cell other than the goal.
    Random,
}

/// Reward table of [`GridWorld`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRewards {
    /// Reaching the goal.
    pub goal: f32,

    /// Moving off a signal cell while the light is red.
    pub red_violation: f32,

    /// Waiting on a signal cell while the light is red.
    pub red_wait: f32,

    /// Any other step, including moves blocked by the border.
    pub step: f32,
}

impl Default for GridRewards {
    fn default() -> Self {
        Self {
            goal: 100.0,
            red_violation: -50.0,
            red_wait: 5.0,
            step: -1.0,
        }
    }
}

/// Configuration of [`GridWorld`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridWorldConfig {
    /// The number of rows.
    pub rows: usize,

    /// The number of columns.
    pub cols: usize,

    /// Goal cell `(row, col)`.
    pub goal: (usize, usize),

    /// Start cell.
    pub start: GridStart,

    /// Cells with a traffic signal.
    pub signals: Vec<(usize, usize)>,

    /// Probability that the light is red at a step.
    pub p_red: f32,

    /// Reward table.
    pub rewards: GridRewards,

    /// Signal seen by the bootstrap.
    pub bootstrap: SignalBootstrap,
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 5,
            goal: (4, 4),
            start: GridStart::Random,
            signals: vec![],
            p_red: 0.3,
            rewards: GridRewards::default(),
            bootstrap: SignalBootstrap::Observed,
        }
    }
}

impl GridWorldConfig {
    /// Sets the size of the grid.
    pub fn size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Sets the goal cell.
    pub fn goal(mut self, row: usize, col: usize) -> Self {
        self.goal = (row, col);
        self
    }

    /// Sets the start cell.
    pub fn start(mut self, v: GridStart) -> Self {
        self.start = v;
        self
    }

    /// Sets the signal cells.
    pub fn signals(mut self, v: Vec<(usize, usize)>) -> Self {
        self.signals = v;
        self
    }

    /// Sets the probability of a red light.
    pub fn p_red(mut self, v: f32) -> Self {
        self.p_red = v;
        self
    }

    /// Sets the bootstrap rule.
    pub fn bootstrap(mut self, v: SignalBootstrap) -> Self {
        self.bootstrap = v;
        self
    }
}

/// Grid navigation. State is `(row, col, signal)`.
///
/// The light is shared by all signal cells and is redrawn at every step.
pub struct GridWorld {
    config: GridWorldConfig,
}

impl GridWorld {
    fn contains(&self, (row, col): (usize, usize)) -> bool {
        row < self.config.rows && col < self.config.cols
    }

    /// Returns `true` if `(row, col)` has a traffic signal.
    pub fn is_signal(&self, row: usize, col: usize) -> bool {
        self.config.signals.contains(&(row, col))
    }

    fn moved(&self, row: usize, col: usize, act: GridAct) -> (usize, usize) {
        match act {
            GridAct::Up => (row.saturating_sub(1), col),
            GridAct::Down => ((row + 1).min(self.config.rows - 1), col),
            GridAct::Left => (row, col.saturating_sub(1)),
            GridAct::Right => (row, (col + 1).min(self.config.cols - 1)),
            GridAct::Wait => (row, col),
        }
    }
}

impl Env for GridWorld {
    type Config = GridWorldConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.rows == 0 || config.cols == 0 {
            return Err(TabrlError::config("grid must have at least one row and column").into());
        }
        if !(0.0..=1.0).contains(&config.p_red) {
            return Err(TabrlError::config(format!("p_red must be in [0, 1], got {}", config.p_red)).into());
        }
        let env = Self {
            config: config.clone(),
        };
        if !env.contains(config.goal) {
            return Err(TabrlError::config("goal lies outside the grid").into());
        }
        match config.start {
            GridStart::Fixed(row, col) if !env.contains((row, col)) => {
                return Err(TabrlError::config("start lies outside the grid").into());
            }
            GridStart::Fixed(row, col) if (row, col) == config.goal => {
                return Err(TabrlError::config("start must differ from goal").into());
            }
            GridStart::Random if config.rows * config.cols < 2 => {
                return Err(TabrlError::config("random start needs a cell other than the goal").into());
            }
            _ => {}
        }
        if config.signals.iter().any(|&cell| !env.contains(cell)) {
            return Err(TabrlError::config("signal lies outside the grid").into());
        }
        info!(
            "Initialize GridWorld: {}x{}, goal = {:?}, signals = {:?}, p_red = {}",
            config.rows, config.cols, config.goal, config.signals, config.p_red
        );
        Ok(env)
    }

    fn n_actions(&self) -> usize {
        GridAct::ALL.len()
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![self.config.rows, self.config.cols, Signal::N]
    }

    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let (row, col) = match self.config.start {
            GridStart::Fixed(row, col) => (row, col),
            GridStart::Random => loop {
                let cell = (
                    rng.gen_range(0..self.config.rows),
                    rng.gen_range(0..self.config.cols),
                );
                if cell != self.config.goal {
                    break cell;
                }
            },
        };
        let signal = Signal::draw(self.config.p_red, rng);
        State::from([row, col, signal.coord()])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, rng: &mut R) -> Step {
        let (row, col) = (state.get(0), state.get(1));
        let red = Signal::from_coord(state.get(2)) == Signal::Red && self.is_signal(row, col);
        let grid_act = GridAct::from_index(act);
        trace!("GridWorld::step({}, {:?})", state, grid_act);
        let (next_row, next_col) = self.moved(row, col, grid_act);
        let is_goal = (next_row, next_col) == self.config.goal;

        let rewards = &self.config.rewards;
        let reward = match (red, grid_act) {
            (true, GridAct::Wait) => rewards.red_wait,
            (true, _) => rewards.red_violation,
            (false, _) if is_goal => rewards.goal,
            _ => rewards.step,
        };

        let signal = Signal::draw(self.config.p_red, rng);
        Step::new(
            act,
            State::from([next_row, next_col, signal.coord()]),
            reward,
            is_goal,
        )
    }

    fn bootstrap_state<R: Rng + ?Sized>(&self, next_state: &State, rng: &mut R) -> State {
        match self.config.bootstrap {
            SignalBootstrap::Observed => next_state.clone(),
            SignalBootstrap::Resampled => {
                next_state.with(2, Signal::draw(self.config.p_red, rng).coord())
            }
        }
    }
}
