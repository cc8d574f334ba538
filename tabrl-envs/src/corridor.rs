//! One-dimensional corridor.
use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Env, State, Step};

/// Configuration of [`Corridor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorridorConfig {
    /// The number of cells.
    pub n_cells: usize,

    /// Start cell.
    pub start: usize,

    /// Goal cell. Reaching it ends the episode.
    pub goal: usize,

    /// Reward for reaching the goal.
    pub goal_reward: f32,

    /// Reward of every other step.
    pub step_reward: f32,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            n_cells: 5,
            start: 0,
            goal: 4,
            goal_reward: 100.0,
            step_reward: -1.0,
        }
    }
}

impl CorridorConfig {
    /// Sets the number of cells.
    pub fn n_cells(mut self, v: usize) -> Self {
        self.n_cells = v;
        self
    }

    /// Sets the start cell.
    pub fn start(mut self, v: usize) -> Self {
        self.start = v;
        self
    }

    /// Sets the goal cell.
    pub fn goal(mut self, v: usize) -> Self {
        self.goal = v;
        self
    }
}

/// A row of cells with actions {left = 0, right = 1}. State is `(cell)`.
pub struct Corridor {
    config: CorridorConfig,
}

impl Corridor {
    /// Move left.
    pub const LEFT: Act = 0;

    /// Move right.
    pub const RIGHT: Act = 1;
}

impl Env for Corridor {
    type Config = CorridorConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.n_cells < 2 {
            return Err(TabrlError::config("corridor needs at least 2 cells").into());
        }
        if config.start >= config.n_cells || config.goal >= config.n_cells {
            return Err(TabrlError::config("start and goal must lie in the corridor").into());
        }
        if config.start == config.goal {
            return Err(TabrlError::config("start must differ from goal").into());
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    fn n_actions(&self) -> usize {
        2
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![self.config.n_cells]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        State::from([self.config.start])
    }

    fn step<R: Rng + ?Sized>(&self, state: &State, act: Act, _rng: &mut R) -> Step {
        let cell = state.get(0);
        let next = match act {
            Self::LEFT => cell.saturating_sub(1),
            _ => (cell + 1).min(self.config.n_cells - 1),
        };
        let is_goal = next == self.config.goal;
        let reward = if is_goal {
            self.config.goal_reward
        } else {
            self.config.step_reward
        };
        Step::new(act, State::from([next]), reward, is_goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn test_edges_are_no_ops() -> Result<()> {
        let env = Corridor::build(&CorridorConfig::default())?;
        let mut rng = SmallRng::seed_from_u64(0);
        let step = env.step(&State::from([0]), Corridor::LEFT, &mut rng);
        assert_eq!(step.next_state, State::from([0]));
        assert_eq!(step.reward, -1.0);
        assert!(!step.is_terminated);

        let env = Corridor::build(&CorridorConfig::default().goal(0).start(2))?;
        let step = env.step(&State::from([4]), Corridor::RIGHT, &mut rng);
        assert_eq!(step.next_state, State::from([4]));
        assert_eq!(step.reward, -1.0);
        Ok(())
    }

    #[test]
    fn test_goal_terminates() -> Result<()> {
        let env = Corridor::build(&CorridorConfig::default())?;
        let mut rng = SmallRng::seed_from_u64(0);
        let step = env.step(&State::from([3]), Corridor::RIGHT, &mut rng);
        assert_eq!(step.next_state, State::from([4]));
        assert_eq!(step.reward, 100.0);
        assert!(step.is_terminated);
        Ok(())
    }

    #[test]
    fn test_invalid_config() {
        assert!(Corridor::build(&CorridorConfig::default().n_cells(1)).is_err());
        assert!(Corridor::build(&CorridorConfig::default().goal(5)).is_err());
        assert!(Corridor::build(&CorridorConfig::default().start(4)).is_err());
    }
}
