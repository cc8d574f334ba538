//! Training session shared with a presentation layer.
use crate::{
    record::Recorder, Act, Env, EpsilonGreedy, Evaluator, QTable, State, Trace, Trainer,
    TrainerConfig,
};
use anyhow::Result;

/// One environment, one [`QTable`] and the [`Trainer`] which owns writes to it.
///
/// A presentation layer keeps a session across interactions. Reads go through
/// [`Session::trained_value`], [`Session::greedy_action`] and [`Session::run_evaluation`],
/// none of which modify the table. Only [`Session::train`] does.
pub struct Session<E: Env> {
    env: E,
    q_table: QTable,
    trainer: Trainer,
    evaluator: Evaluator,
}

impl<E: Env> Session<E> {
    /// Builds the environment from its configuration and starts a session on an empty table.
    pub fn build(env_config: &E::Config, config: TrainerConfig) -> Result<Self> {
        Self::new(E::build(env_config)?, config)
    }

    /// Starts a session on an empty table.
    pub fn new(env: E, config: TrainerConfig) -> Result<Self> {
        let evaluator = Evaluator::new(config.max_steps_per_episode, config.seed.wrapping_add(2))?;
        let trainer = Trainer::build(config)?;
        Ok(Self {
            q_table: QTable::new(env.n_actions()),
            env,
            trainer,
            evaluator,
        })
    }

    /// Runs the configured number of episodes on the current table.
    ///
    /// Repeated calls accumulate learning.
    pub fn train<R: Recorder + ?Sized>(&mut self, recorder: &mut R) -> Result<()> {
        self.trainer.train(&self.env, &mut self.q_table, recorder)
    }

    /// Learned action-values of `state`. Unseen states read as zeros.
    pub fn trained_value(&self, state: &State) -> Vec<f32> {
        self.q_table.values(state)
    }

    /// The greedy action in `state`.
    pub fn greedy_action(&self, state: &State) -> Act {
        EpsilonGreedy::greedy(&self.q_table, state)
    }

    /// A greedy rollout from `start`.
    pub fn run_evaluation(&mut self, start: State) -> Result<Trace> {
        self.evaluator.rollout(&self.env, &self.q_table, start)
    }

    /// The learned table.
    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The number of episodes trained so far.
    pub fn episodes_done(&self) -> usize {
        self.trainer.episodes_done()
    }
}
