//! Greedy rollouts on a learned [`QTable`].
use crate::{
    error::TabrlError,
    record::{Record, RecordValue::Scalar},
    Act, Env, EpsilonGreedy, QTable, State,
};
use anyhow::Result;
use log::debug;
use rand::{rngs::SmallRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// One step of a [`Trace`]: the state acted from, the action and the reward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceStep {
    /// State before the action.
    pub state: State,

    /// Greedy action.
    pub act: Act,

    /// Reward of the transition.
    pub reward: f32,
}

/// Result of a greedy rollout, for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Steps in order.
    pub steps: Vec<TraceStep>,

    /// State after the last step.
    pub final_state: State,

    /// `true` if the rollout ended on a terminal step rather than on the step cap.
    pub terminated: bool,
}

impl Trace {
    /// Sum of rewards.
    pub fn total_reward(&self) -> f32 {
        self.steps.iter().map(|s| s.reward).sum()
    }

    /// The number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if no step was taken.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Visited states, from the start state to [`Trace::final_state`].
    pub fn states(&self) -> Vec<State> {
        self.steps
            .iter()
            .map(|s| s.state.clone())
            .chain(std::iter::once(self.final_state.clone()))
            .collect()
    }
}

/// Runs greedy (`epsilon = 0`) rollouts without learning.
///
/// The table is taken by shared reference, so evaluation can never update it. The
/// evaluator owns a seeded random source for the exogenous variables of the environment.
pub struct Evaluator {
    max_steps: usize,
    rng: SmallRng,
}

impl Evaluator {
    /// Constructs an evaluator with its own step cap and seed.
    pub fn new(max_steps: usize, seed: u64) -> Result<Self> {
        if max_steps == 0 {
            return Err(TabrlError::config("max_steps of evaluation must be positive").into());
        }
        Ok(Self {
            max_steps,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The step cap.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Runs one greedy rollout from `start` and records every step.
    pub fn rollout<E: Env>(&mut self, env: &E, q_table: &QTable, start: State) -> Result<Trace> {
        let dims = env.state_dims();
        start.check_within(&dims)?;
        let mut steps = Vec::new();
        let mut state = start;
        let mut terminated = false;

        for _ in 0..self.max_steps {
            let act = EpsilonGreedy::greedy(q_table, &state);
            let step = env.step(&state, act, &mut self.rng);
            step.next_state.check_within(&dims)?;
            steps.push(TraceStep {
                state,
                act,
                reward: step.reward,
            });
            state = step.next_state;
            if step.is_terminated {
                terminated = true;
                break;
            }
        }

        debug!(
            "Rollout: {} steps, terminated = {}, final state = {}",
            steps.len(),
            terminated,
            state
        );
        Ok(Trace {
            steps,
            final_state: state,
            terminated,
        })
    }

    /// Runs one greedy rollout from the initial state of the environment.
    ///
    /// The returned record has `"eval_return"` and `"eval_length"`.
    pub fn evaluate<E: Env>(&mut self, env: &E, q_table: &QTable) -> Result<Record> {
        let start = env.reset(&mut self.rng);
        let trace = self.rollout(env, q_table, start)?;
        Ok(Record::from_slice(&[
            ("eval_return", Scalar(trace.total_reward())),
            ("eval_length", Scalar(trace.len() as f32)),
        ]))
    }
}
