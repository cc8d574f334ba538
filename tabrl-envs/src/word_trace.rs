//! Tracing a hidden word across a letter grid.
use crate::word_grid::LetterGrid;
use anyhow::Result;
use log::{info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Env, State, Step};

/// `(row, col)` offsets of the eight compass moves, indexed by action.
pub const MOVES: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Value of the `last_move` coordinate before the first move.
pub const NO_MOVE: usize = 8;

/// Reward table of [`WordTraceEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTraceRewards {
    /// Trying to leave the grid.
    pub off_grid: f32,

    /// Stepping back onto the cell just left.
    pub backtrack: f32,

    /// Stepping onto the next letter of the word.
    pub letter: f32,

    /// Stepping onto the last letter of the word.
    pub word: f32,

    /// Any other move.
    pub step: f32,
}

impl Default for WordTraceRewards {
    fn default() -> Self {
        Self {
            off_grid: -5.0,
            backtrack: -3.0,
            letter: 10.0,
            word: 100.0,
            step: -1.0,
        }
    }
}

/// Configuration of [`WordTraceEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTraceEnvConfig {
    /// Rows of the letter grid.
    pub grid: Vec<String>,

    /// The word to trace.
    pub word: String,

    /// Reward table.
    pub rewards: WordTraceRewards,
}

impl Default for WordTraceEnvConfig {
    fn default() -> Self {
        Self {
            grid: vec![
                "DATAQ".to_string(),
                "XKLMB".to_string(),
                "ZRTUV".to_string(),
                "PWEYC".to_string(),
                "HGJNO".to_string(),
            ],
            word: "DATA".to_string(),
            rewards: WordTraceRewards::default(),
        }
    }
}

impl WordTraceEnvConfig {
    /// Sets the letter grid.
    pub fn grid(mut self, grid: &LetterGrid) -> Self {
        self.grid = grid.rows();
        self
    }

    /// Sets the word.
    pub fn word(mut self, v: impl Into<String>) -> Self {
        self.word = v.into();
        self
    }
}

/// Word tracing. State is `(row, col, matched, last_move)`.
///
/// `matched` counts the letters of the word traced so far. The letter under the start
/// cell does not count.
///
/// The backtrack penalty only applies to the move opposite to `last_move`, that is
/// stepping straight back onto the cell just left. Returning to a cell visited earlier
/// in the episode by any other route is an ordinary move.
pub struct WordTraceEnv {
    grid: LetterGrid,
    word: Vec<char>,
    rewards: WordTraceRewards,
}

impl WordTraceEnv {
    /// The letter grid.
    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    fn target(&self, row: usize, col: usize, act: Act) -> Option<(usize, usize)> {
        let (dr, dc) = MOVES[act];
        let n = self.grid.size() as isize;
        let r = row as isize + dr;
        let c = col as isize + dc;
        if (0..n).contains(&r) && (0..n).contains(&c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    fn is_backtrack(last_move: usize, act: Act) -> bool {
        match MOVES.get(last_move) {
            Some(&(dr, dc)) => MOVES[act] == (-dr, -dc),
            None => false,
        }
    }
}

impl Env for WordTraceEnv {
    type Config = WordTraceEnvConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        let grid = LetterGrid::from_rows(&config.grid)?;
        let word: Vec<char> = config.word.chars().collect();
        if word.is_empty() {
            return Err(TabrlError::config("word must not be empty").into());
        }
        info!(
            "Initialize WordTraceEnv: {}x{} grid, word = {}",
            grid.size(),
            grid.size(),
            config.word
        );
        Ok(Self {
            grid,
            word,
            rewards: config.rewards.clone(),
        })
    }

    fn n_actions(&self) -> usize {
        MOVES.len()
    }

    fn state_dims(&self) -> Vec<usize> {
        let n = self.grid.size();
        vec![n, n, self.word.len() + 1, NO_MOVE + 1]
    }

    fn reset<R: Rng + ?Sized>(&self, rng: &mut R) -> State {
        let n = self.grid.size();
        State::from([rng.gen_range(0..n), rng.gen_range(0..n), 0, NO_MOVE])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, _rng: &mut R) -> Step {
        let (row, col, matched, last_move) = (state.get(0), state.get(1), state.get(2), state.get(3));
        let r = &self.rewards;

        let (row, col) = match self.target(row, col, act) {
            Some(cell) => cell,
            None => return Step::new(act, state.clone(), r.off_grid, false),
        };

        let (reward, matched) = if Self::is_backtrack(last_move, act) {
            (r.backtrack, matched)
        } else if matched < self.word.len() && self.grid.get(row, col) == self.word[matched] {
            if matched + 1 == self.word.len() {
                (r.word, matched + 1)
            } else {
                (r.letter, matched + 1)
            }
        } else {
            (r.step, matched)
        };

        let is_terminated = matched == self.word.len();
        trace!("WordTraceEnv::step(): ({}, {}), matched = {}, r = {}", row, col, matched, reward);
        Step::new(act, State::from([row, col, matched, act]), reward, is_terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const UP: Act = 0;
    const DOWN: Act = 1;
    const LEFT: Act = 2;
    const RIGHT: Act = 3;

    #[test]
    fn test_trace_word() -> Result<()> {
        let env = WordTraceEnv::build(&WordTraceEnvConfig::default())?;
        let mut rng = SmallRng::seed_from_u64(0);

        let step = env.step(&State::from([1, 0, 0, NO_MOVE]), UP, &mut rng);
        assert_eq!(step.next_state, State::from([0, 0, 1, UP]));
        assert_eq!(step.reward, 10.0);

        let mut state = step.next_state;
        for expected in [10.0, 10.0, 100.0].iter() {
            let step = env.step(&state, RIGHT, &mut rng);
            assert_eq!(step.reward, *expected);
            state = step.next_state;
        }
        assert_eq!(state, State::from([0, 3, 4, RIGHT]));
        assert!(env.step(&State::from([0, 2, 3, RIGHT]), RIGHT, &mut rng).is_terminated);
        Ok(())
    }

    #[test]
    fn test_penalties() -> Result<()> {
        let env = WordTraceEnv::build(&WordTraceEnvConfig::default())?;
        let mut rng = SmallRng::seed_from_u64(0);

        // off grid: no move
        let state = State::from([0, 0, 1, UP]);
        let step = env.step(&state, UP, &mut rng);
        assert_eq!(step.next_state, state);
        assert_eq!(step.reward, -5.0);

        // back onto the cell just left
        let step = env.step(&State::from([0, 1, 2, RIGHT]), LEFT, &mut rng);
        assert_eq!(step.next_state, State::from([0, 0, 2, LEFT]));
        assert_eq!(step.reward, -3.0);

        // plain move
        let step = env.step(&State::from([2, 2, 0, NO_MOVE]), DOWN, &mut rng);
        assert_eq!(step.next_state, State::from([3, 2, 0, DOWN]));
        assert_eq!(step.reward, -1.0);
        assert!(!step.is_terminated);
        Ok(())
    }

    #[test]
    fn test_states_in_bounds() -> Result<()> {
        let env = WordTraceEnv::build(&WordTraceEnvConfig::default())?;
        let dims = env.state_dims();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut state = env.reset(&mut rng);
        for _ in 0..5000 {
            let act = rng.gen_range(0..env.n_actions());
            let step = env.step(&state, act, &mut rng);
            assert!(step.next_state.is_within(&dims));
            state = if step.is_terminated {
                env.reset(&mut rng)
            } else {
                step.next_state
            };
        }
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(WordTraceEnv::build(&WordTraceEnvConfig::default().word("")).is_err());
        let mut config = WordTraceEnvConfig::default();
        config.grid.pop();
        assert!(WordTraceEnv::build(&config).is_err());
    }
}
