//! Configuration of [`Trainer`](super::Trainer).
use crate::{error::TabrlError, EpsilonGreedy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of episodes run by one call of `train`.
    pub episodes: usize,

    /// Hard cap on the number of steps of an episode.
    pub max_steps_per_episode: usize,

    /// Learning rate, in `(0, 1]`.
    pub alpha: f32,

    /// Discount factor, in `(0, 1]`.
    pub gamma: f32,

    /// Exploration schedule.
    pub explorer: EpsilonGreedy,

    /// Seed of the random source of the run.
    pub seed: u64,

    /// Interval of evaluation in episodes. `0` disables evaluation during training.
    pub eval_interval: usize,

    /// Interval of flushing records in episodes.
    pub record_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            max_steps_per_episode: 100,
            alpha: 0.1,
            gamma: 0.9,
            explorer: EpsilonGreedy::default(),
            seed: 42,
            eval_interval: 0,
            record_interval: 100,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of episodes.
    pub fn episodes(mut self, v: usize) -> Self {
        self.episodes = v;
        self
    }

    /// Sets the step cap of an episode.
    pub fn max_steps_per_episode(mut self, v: usize) -> Self {
        self.max_steps_per_episode = v;
        self
    }

    /// Sets the learning rate.
    pub fn alpha(mut self, v: f32) -> Self {
        self.alpha = v;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, v: f32) -> Self {
        self.gamma = v;
        self
    }

    /// Sets a constant epsilon.
    pub fn epsilon(mut self, v: f32) -> Self {
        self.explorer = EpsilonGreedy::constant(v);
        self
    }

    /// Sets the exploration schedule.
    pub fn explorer(mut self, v: EpsilonGreedy) -> Self {
        self.explorer = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the interval of evaluation in episodes.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Sets the interval of flushing records in episodes.
    pub fn record_interval(mut self, v: usize) -> Self {
        self.record_interval = v;
        self
    }

    /// Checks value ranges. Called once before any episode runs.
    pub fn validate(&self) -> Result<()> {
        if self.episodes == 0 {
            return Err(TabrlError::config("episodes must be positive").into());
        }
        if self.max_steps_per_episode == 0 {
            return Err(TabrlError::config("max_steps_per_episode must be positive").into());
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(TabrlError::config(format!("alpha must be in (0, 1], got {}", self.alpha)).into());
        }
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(TabrlError::config(format!("gamma must be in (0, 1], got {}", self.gamma)).into());
        }
        if self.record_interval == 0 {
            return Err(TabrlError::config("record_interval must be positive").into());
        }
        self.explorer.validate()
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
