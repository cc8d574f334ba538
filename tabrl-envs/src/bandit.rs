//! Multi-armed bandit.
use anyhow::Result;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tabrl_core::{error::TabrlError, Act, Env, State, Step};

/// Configuration of [`BanditEnv`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BanditEnvConfig {
    /// Mean reward of each arm.
    pub arm_means: Vec<f32>,

    /// Standard deviation of the reward of every arm.
    pub reward_std: f32,
}

impl Default for BanditEnvConfig {
    fn default() -> Self {
        Self {
            arm_means: vec![0.2, 0.5, 0.8, 0.3],
            reward_std: 0.1,
        }
    }
}

impl BanditEnvConfig {
    /// Sets the arm means.
    pub fn arm_means(mut self, v: Vec<f32>) -> Self {
        self.arm_means = v;
        self
    }

    /// Sets the reward noise.
    pub fn reward_std(mut self, v: f32) -> Self {
        self.reward_std = v;
        self
    }
}

/// A bandit as a two-state episodic task: `(0)` before the pull, `(1)` after it.
///
/// Every pull ends the episode. The post-pull state is never acted from, so its values
/// stay zero and the learned value of an arm tracks its mean reward.
pub struct BanditEnv {
    arm_means: Vec<f32>,
    noise: Option<Normal<f32>>,
}

impl BanditEnv {
    /// The state before the pull.
    pub fn ready() -> State {
        State::from([0])
    }

    /// The index of the arm with the largest mean, first on ties.
    pub fn best_arm(&self) -> Act {
        tabrl_core::argmax(&self.arm_means)
    }
}

impl Env for BanditEnv {
    type Config = BanditEnvConfig;

    fn build(config: &Self::Config) -> Result<Self> {
        if config.arm_means.is_empty() {
            return Err(TabrlError::config("a bandit needs at least one arm").into());
        }
        let noise = if config.reward_std == 0.0 {
            None
        } else {
            let normal = Normal::new(0.0, config.reward_std)
                .map_err(|e| TabrlError::config(format!("reward_std: {}", e)))?;
            Some(normal)
        };
        Ok(Self {
            arm_means: config.arm_means.clone(),
            noise,
        })
    }

    fn n_actions(&self) -> usize {
        self.arm_means.len()
    }

    fn state_dims(&self) -> Vec<usize> {
        vec![2]
    }

    fn reset<R: Rng + ?Sized>(&self, _rng: &mut R) -> State {
        Self::ready()
    }

    fn step<R: Rng + ?Sized>(&self, _state: &State, act: Act, rng: &mut R) -> Step {
        let noise = match &self.noise {
            Some(normal) => normal.sample(rng),
            None => 0.0,
        };
        Step::new(act, State::from([1]), self.arm_means[act] + noise, true)
    }
}
