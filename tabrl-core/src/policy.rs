//! Epsilon-greedy action selection over a [`QTable`].
use crate::{error::TabrlError, Act, QTable, State};
use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of the largest value. Ties go to the first index attaining the maximum.
///
/// Panics if `values` is empty.
pub fn argmax(values: &[f32]) -> Act {
    assert!(!values.is_empty(), "argmax of an empty slice");
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

/// Epsilon-greedy explorer.
///
/// Epsilon decays linearly from `eps_start` to `eps_final` over the first `final_episode`
/// episodes and then stays at `eps_final`. [`EpsilonGreedy::constant`] gives a fixed
/// epsilon.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedy {
    /// Epsilon at the first episode.
    pub eps_start: f32,

    /// Epsilon from `final_episode` on.
    pub eps_final: f32,

    /// The episode at which `eps_final` is reached.
    pub final_episode: usize,
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::constant(0.2)
    }
}

impl EpsilonGreedy {
    /// Constant epsilon.
    pub fn constant(eps: f32) -> Self {
        Self {
            eps_start: eps,
            eps_final: eps,
            final_episode: 0,
        }
    }

    /// Linearly decaying epsilon.
    pub fn linear(eps_start: f32, eps_final: f32, final_episode: usize) -> Self {
        Self {
            eps_start,
            eps_final,
            final_episode,
        }
    }

    /// Checks that both ends of the schedule lie in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, eps) in [("eps_start", self.eps_start), ("eps_final", self.eps_final)] {
            if !(0.0..=1.0).contains(&eps) {
                return Err(TabrlError::config(format!("{} must be in [0, 1], got {}", name, eps)).into());
            }
        }
        Ok(())
    }

    /// Epsilon used in the given (zero-based) episode.
    pub fn epsilon(&self, episode: usize) -> f32 {
        if episode >= self.final_episode {
            self.eps_final
        } else {
            let frac = episode as f32 / self.final_episode as f32;
            self.eps_start + (self.eps_final - self.eps_start) * frac
        }
    }

    /// Chooses an action for `state`.
    ///
    /// With probability `epsilon` the action is uniform over the action set. Otherwise it
    /// is [`EpsilonGreedy::greedy`]. With `epsilon <= 0` no random number is drawn.
    pub fn choose<R: Rng + ?Sized>(
        q_table: &QTable,
        state: &State,
        epsilon: f32,
        rng: &mut R,
    ) -> Act {
        if epsilon > 0.0 && rng.gen::<f32>() < epsilon {
            rng.gen_range(0..q_table.n_actions())
        } else {
            Self::greedy(q_table, state)
        }
    }

    /// The action with the largest value, first index on ties.
    pub fn greedy(q_table: &QTable, state: &State) -> Act {
        argmax(&q_table.values(state))
    }
}
